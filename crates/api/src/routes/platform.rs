//! Route definitions for the `/v2` platform API.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{memberships, organization_users};
use crate::state::AppState;

/// Routes mounted at `/v2/organizations`.
///
/// ```text
/// GET    /{org_id}/memberships            -> memberships::list
///
/// GET    /{org_id}/users                  -> organization_users::list
/// POST   /{org_id}/users                  -> organization_users::create
/// PATCH  /{org_id}/users/{user_id}        -> organization_users::update
/// DELETE /{org_id}/users/{user_id}        -> organization_users::delete
/// ```
pub fn organizations_router() -> Router<AppState> {
    Router::new()
        .route("/{org_id}/memberships", get(memberships::list))
        .route(
            "/{org_id}/users",
            get(organization_users::list).post(organization_users::create),
        )
        .route(
            "/{org_id}/users/{user_id}",
            patch(organization_users::update).delete(organization_users::delete),
        )
}
