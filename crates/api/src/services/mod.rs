//! Request workflows that span several repositories or remote services.
//!
//! Services depend on narrow store traits rather than the pool directly so
//! the workflows can be exercised with in-memory fakes.

pub mod organization_users;
pub mod phone_calls;
