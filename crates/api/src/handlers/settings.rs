//! Server-rendered organization settings pages.

use agenda_core::attributes::AttributeType;
use agenda_core::roles::MembershipRole;
use agenda_core::types::DbId;
use agenda_db::repositories::AttributeRepo;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use super::attributes::create_attribute;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::org::require_org_role;
use crate::pages::attributes::{attributes_page_path, render_attributes_page};
use crate::state::AppState;

/// Fields of the "Add attribute" form.
#[derive(Debug, Deserialize)]
pub struct AttributeForm {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
}

/// GET /settings/organizations/{org_id}/attributes
pub async fn attributes_page(
    user: AuthUser,
    State(state): State<AppState>,
    Path(org_id): Path<DbId>,
) -> AppResult<Html<String>> {
    let access = require_org_role(&state.pool, &user, org_id, MembershipRole::Member).await?;
    let attributes = AttributeRepo::list_by_team(&state.pool, org_id).await?;
    Ok(Html(render_attributes_page(
        &access.organization,
        &attributes,
        access.can_manage(),
    )))
}

/// POST /settings/organizations/{org_id}/attributes
///
/// Creates the attribute and redirects back to the page (303).
pub async fn create_attribute_form(
    user: AuthUser,
    State(state): State<AppState>,
    Path(org_id): Path<DbId>,
    Form(form): Form<AttributeForm>,
) -> AppResult<Redirect> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Admin).await?;
    create_attribute(&state.pool, org_id, &form.name, form.attribute_type).await?;
    Ok(Redirect::to(&attributes_page_path(org_id)))
}
