//! Handlers for organization attributes (JSON API).

use agenda_core::attributes::{attribute_name_and_slug, AttributeType};
use agenda_core::error::CoreError;
use agenda_core::roles::MembershipRole;
use agenda_core::types::DbId;
use agenda_db::models::attribute::{Attribute, CreateAttribute, UpdateAttribute};
use agenda_db::repositories::AttributeRepo;
use agenda_db::DbPool;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::org::require_org_role;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating an attribute.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttributeRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
}

/// Request body for updating an attribute.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAttributeRequest {
    pub name: Option<String>,
    pub enabled: Option<bool>,
}

/// Normalize `name`, derive its slug and insert the attribute.
///
/// Shared by the JSON API and the settings form.
pub(crate) async fn create_attribute(
    pool: &DbPool,
    org_id: DbId,
    name: &str,
    attribute_type: AttributeType,
) -> AppResult<Attribute> {
    let (name, slug) = attribute_name_and_slug(name)?;

    let attribute = AttributeRepo::create(
        pool,
        &CreateAttribute {
            team_id: org_id,
            name,
            slug,
            attribute_type,
        },
    )
    .await?;

    tracing::info!(
        org_id,
        attribute_id = attribute.id,
        slug = %attribute.slug,
        "Attribute created",
    );

    Ok(attribute)
}

/// GET /api/v1/organizations/{org_id}/attributes
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    Path(org_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Member).await?;
    let attributes = AttributeRepo::list_by_team(&state.pool, org_id).await?;
    Ok(Json(DataResponse { data: attributes }))
}

/// POST /api/v1/organizations/{org_id}/attributes
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(org_id): Path<DbId>,
    Json(input): Json<CreateAttributeRequest>,
) -> AppResult<impl IntoResponse> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Admin).await?;
    let attribute = create_attribute(&state.pool, org_id, &input.name, input.attribute_type).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: attribute })))
}

/// PATCH /api/v1/organizations/{org_id}/attributes/{id}
///
/// Renaming an attribute re-derives its slug.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path((org_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateAttributeRequest>,
) -> AppResult<impl IntoResponse> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Admin).await?;

    let (name, slug) = match input.name.as_deref() {
        Some(raw) => {
            let (name, slug) = attribute_name_and_slug(raw)?;
            (Some(name), Some(slug))
        }
        None => (None, None),
    };

    let attribute = AttributeRepo::update(
        &state.pool,
        org_id,
        id,
        &UpdateAttribute {
            name,
            slug,
            enabled: input.enabled,
        },
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "Attribute",
        id,
    })?;

    tracing::info!(org_id, attribute_id = id, "Attribute updated");
    Ok(Json(DataResponse { data: attribute }))
}

/// DELETE /api/v1/organizations/{org_id}/attributes/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path((org_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Admin).await?;

    if !AttributeRepo::delete(&state.pool, org_id, id).await? {
        return Err(CoreError::NotFound {
            entity: "Attribute",
            id,
        }
        .into());
    }

    tracing::info!(org_id, attribute_id = id, "Attribute deleted");
    Ok(StatusCode::NO_CONTENT)
}
