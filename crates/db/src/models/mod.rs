//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and partial updates

pub mod attribute;
pub mod invitation;
pub mod membership;
pub mod organization;
pub mod organization_user;
pub mod phone_call_config;
