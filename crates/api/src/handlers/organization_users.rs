//! Handlers for `/v2/organizations/{org_id}/users`.
//!
//! All endpoints require organization admin rights and delegate to
//! [`OrganizationUsersService`].

use agenda_core::roles::MembershipRole;
use agenda_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::org::require_org_role;
use crate::query::EmailFilterParams;
use crate::response::ApiResponse;
use crate::services::organization_users::{
    CreateOrganizationUserInput, OrganizationUsersService, PgOrganizationUserStore,
    UpdateOrganizationUserInput,
};
use crate::state::AppState;

/// GET /v2/organizations/{org_id}/users?emails=a@x.com,b@y.com
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    Path(org_id): Path<DbId>,
    Query(params): Query<EmailFilterParams>,
) -> AppResult<impl IntoResponse> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Admin).await?;

    let store = PgOrganizationUserStore::new(state.pool.clone());
    let service = OrganizationUsersService {
        users: &store,
        invitations: &store,
    };
    let users = service.list(org_id, &params.emails()).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// POST /v2/organizations/{org_id}/users
///
/// Returns 201 with the created user; 409 if the email or username is taken.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(org_id): Path<DbId>,
    Json(input): Json<CreateOrganizationUserInput>,
) -> AppResult<impl IntoResponse> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Admin).await?;

    let store = PgOrganizationUserStore::new(state.pool.clone());
    let service = OrganizationUsersService {
        users: &store,
        invitations: &store,
    };
    let created = service.create(org_id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// PATCH /v2/organizations/{org_id}/users/{user_id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path((org_id, user_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateOrganizationUserInput>,
) -> AppResult<impl IntoResponse> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Admin).await?;

    let store = PgOrganizationUserStore::new(state.pool.clone());
    let service = OrganizationUsersService {
        users: &store,
        invitations: &store,
    };
    let updated = service.update(org_id, user_id, input).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /v2/organizations/{org_id}/users/{user_id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path((org_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    require_org_role(&state.pool, &user, org_id, MembershipRole::Admin).await?;

    let store = PgOrganizationUserStore::new(state.pool.clone());
    let service = OrganizationUsersService {
        users: &store,
        invitations: &store,
    };
    let deleted = service.delete(org_id, user_id).await?;
    Ok(Json(ApiResponse::success(deleted)))
}
