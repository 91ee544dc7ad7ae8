//! Authentication and authorization middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`org::require_org_role`] -- Checks the caller's membership in an organization.

pub mod auth;
pub mod org;
