//! Organization user entity model and DTOs.

use agenda_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table for a user belonging to an organization.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationUser {
    pub id: DbId,
    pub username: Option<String>,
    pub email: String,
    pub name: Option<String>,
    pub time_zone: String,
    pub week_start: String,
    pub time_format: Option<i32>,
    pub locale: Option<String>,
    pub avatar_url: Option<String>,
    pub organization_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating an organization user. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrganizationUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub time_format: Option<i32>,
    pub week_start: Option<String>,
    pub time_zone: Option<String>,
    pub locale: Option<String>,
    pub avatar_url: Option<String>,
}
