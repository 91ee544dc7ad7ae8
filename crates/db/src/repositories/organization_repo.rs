//! Repository for the `teams` table.

use agenda_core::types::DbId;
use sqlx::PgPool;

use crate::models::organization::{CreateOrganization, Organization};

const COLUMNS: &str = "id, name, slug, is_organization, created_at, updated_at";

/// Provides lookups and inserts for teams and organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Insert a new team, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (name, slug, is_organization)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.is_organization)
            .fetch_one(pool)
            .await
    }

    /// Find a team by id regardless of whether it is an organization.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a team by id only if it is flagged as an organization.
    pub async fn find_organization(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM teams WHERE id = $1 AND is_organization = true");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
