//! Organization (team) entity model.

use agenda_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `teams` table.
///
/// Organizations are teams with `is_organization = true`; they form the
/// tenant boundary for users, memberships and attributes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub is_organization: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new team or organization.
#[derive(Debug, Clone)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
    pub is_organization: bool,
}
