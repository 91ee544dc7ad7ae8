//! Repository for users scoped to an organization.
//!
//! Every query filters on `users.organization_id` so a caller can never
//! read or modify a user of another tenant.

use agenda_core::types::DbId;
use sqlx::PgPool;

use crate::models::organization_user::{OrganizationUser, UpdateOrganizationUser};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, username, email, name, time_zone, week_start, time_format, \
                                  locale, avatar_url, organization_id, created_at, updated_at";

/// Provides CRUD operations for organization users.
pub struct OrganizationUserRepo;

impl OrganizationUserRepo {
    /// List users of an organization, optionally restricted to `emails`.
    ///
    /// An empty `emails` slice returns every user of the organization.
    pub async fn list(
        pool: &PgPool,
        org_id: DbId,
        emails: &[String],
    ) -> Result<Vec<OrganizationUser>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE organization_id = $1
               AND (cardinality($2::text[]) = 0 OR email = ANY($2))
             ORDER BY id"
        );
        sqlx::query_as::<_, OrganizationUser>(&query)
            .bind(org_id)
            .bind(emails)
            .fetch_all(pool)
            .await
    }

    /// Find an organization user by id.
    pub async fn find_by_id(
        pool: &PgPool,
        org_id: DbId,
        user_id: DbId,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE organization_id = $1 AND id = $2");
        sqlx::query_as::<_, OrganizationUser>(&query)
            .bind(org_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an organization user by email (case-sensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        org_id: DbId,
        email: &str,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE organization_id = $1 AND email = $2");
        sqlx::query_as::<_, OrganizationUser>(&query)
            .bind(org_id)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find an organization user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        org_id: DbId,
        username: &str,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE organization_id = $1 AND username = $2");
        sqlx::query_as::<_, OrganizationUser>(&query)
            .bind(org_id)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Update an organization user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user does not exist in the organization.
    pub async fn update(
        pool: &PgPool,
        org_id: DbId,
        user_id: DbId,
        input: &UpdateOrganizationUser,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($3, email),
                username = COALESCE($4, username),
                name = COALESCE($5, name),
                time_format = COALESCE($6, time_format),
                week_start = COALESCE($7, week_start),
                time_zone = COALESCE($8, time_zone),
                locale = COALESCE($9, locale),
                avatar_url = COALESCE($10, avatar_url)
             WHERE organization_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrganizationUser>(&query)
            .bind(org_id)
            .bind(user_id)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.name)
            .bind(input.time_format)
            .bind(&input.week_start)
            .bind(&input.time_zone)
            .bind(&input.locale)
            .bind(&input.avatar_url)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an organization user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, org_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE organization_id = $1 AND id = $2")
            .bind(org_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
