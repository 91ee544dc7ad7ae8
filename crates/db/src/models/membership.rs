//! Membership entity model.

use std::str::FromStr;

use agenda_core::error::CoreError;
use agenda_core::roles::MembershipRole;
use agenda_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `memberships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub id: DbId,
    pub team_id: DbId,
    pub user_id: DbId,
    /// One of `MEMBER`, `ADMIN`, `OWNER`.
    pub role: String,
    pub accepted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Membership {
    /// Parse the stored role string.
    pub fn role(&self) -> Result<MembershipRole, CoreError> {
        MembershipRole::from_str(&self.role)
    }
}
