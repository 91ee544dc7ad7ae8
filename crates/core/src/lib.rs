//! Domain types and pure logic shared by the database, voice and API crates.
//!
//! Nothing in here performs I/O.

pub mod attributes;
pub mod error;
pub mod phone_call;
pub mod rate_limit;
pub mod roles;
pub mod types;
