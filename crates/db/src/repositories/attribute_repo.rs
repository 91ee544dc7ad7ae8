//! Repository for the `attributes` table.

use agenda_core::types::DbId;
use sqlx::PgPool;

use crate::models::attribute::{Attribute, CreateAttribute, UpdateAttribute};

const COLUMNS: &str = "id, team_id, name, slug, type, enabled, created_at, updated_at";

/// Provides CRUD operations for organization attributes.
pub struct AttributeRepo;

impl AttributeRepo {
    /// Insert a new attribute, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAttribute) -> Result<Attribute, sqlx::Error> {
        let query = format!(
            "INSERT INTO attributes (team_id, name, slug, type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(input.team_id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.attribute_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// List all attributes of a team ordered by name.
    pub async fn list_by_team(pool: &PgPool, team_id: DbId) -> Result<Vec<Attribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attributes WHERE team_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, Attribute>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }

    /// Update an attribute. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no attribute with `id` exists in the team.
    pub async fn update(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
        input: &UpdateAttribute,
    ) -> Result<Option<Attribute>, sqlx::Error> {
        let query = format!(
            "UPDATE attributes SET
                name = COALESCE($3, name),
                slug = COALESCE($4, slug),
                enabled = COALESCE($5, enabled)
             WHERE team_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(team_id)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.enabled)
            .fetch_optional(pool)
            .await
    }

    /// Delete an attribute. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, team_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attributes WHERE team_id = $1 AND id = $2")
            .bind(team_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
