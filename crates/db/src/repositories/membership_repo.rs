//! Repository for the `memberships` table.

use agenda_core::roles::MembershipRole;
use agenda_core::types::DbId;
use sqlx::PgPool;

use crate::models::membership::Membership;

const COLUMNS: &str = "id, team_id, user_id, role, accepted, created_at, updated_at";

/// Provides data access for team and organization memberships.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Insert a membership, returning the created row.
    pub async fn create(
        pool: &PgPool,
        team_id: DbId,
        user_id: DbId,
        role: MembershipRole,
        accepted: bool,
    ) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "INSERT INTO memberships (team_id, user_id, role, accepted)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(team_id)
            .bind(user_id)
            .bind(role.as_str())
            .bind(accepted)
            .fetch_one(pool)
            .await
    }

    /// List all memberships of a team, oldest first.
    pub async fn list_by_team(pool: &PgPool, team_id: DbId) -> Result<Vec<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships WHERE team_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }

    /// Find the membership of `user_id` in `team_id`, accepted or not.
    pub async fn find(
        pool: &PgPool,
        team_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM memberships WHERE team_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Membership>(&query)
            .bind(team_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
