//! Custom attribute entity model and DTOs.

use std::str::FromStr;

use agenda_core::attributes::AttributeType;
use agenda_core::error::CoreError;
use agenda_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attributes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attribute {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    pub slug: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub attribute_type: String,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Attribute {
    /// Parse the stored type string.
    pub fn kind(&self) -> Result<AttributeType, CoreError> {
        AttributeType::from_str(&self.attribute_type)
    }
}

/// DTO for inserting an attribute.
#[derive(Debug, Clone)]
pub struct CreateAttribute {
    pub team_id: DbId,
    pub name: String,
    pub slug: String,
    pub attribute_type: AttributeType,
}

/// DTO for updating an attribute. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateAttribute {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub enabled: Option<bool>,
}
