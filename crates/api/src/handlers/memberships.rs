//! Handlers for organization memberships.

use agenda_core::roles::MembershipRole;
use agenda_core::types::DbId;
use agenda_db::models::membership::Membership;
use agenda_db::repositories::MembershipRepo;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::org::require_org_role;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /v2/organizations/{org_id}/memberships
///
/// Requires an accepted `ADMIN` or `OWNER` membership in the organization.
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    Path(org_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<Membership>>>> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Admin).await?;
    let memberships = MembershipRepo::list_by_team(&state.pool, org_id).await?;
    Ok(Json(ApiResponse::success(memberships)))
}
