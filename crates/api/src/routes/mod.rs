pub mod health;
pub mod organizations;
pub mod platform;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /organizations/phone-calls                       create phone call
/// /organizations/{org_id}/attributes               list, create
/// /organizations/{org_id}/attributes/{id}          update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/organizations", organizations::router())
}

/// Build the `/v2` platform route tree.
///
/// ```text
/// /organizations/{org_id}/memberships              list (org admin)
/// /organizations/{org_id}/users                    list, create (org admin)
/// /organizations/{org_id}/users/{user_id}          update, delete (org admin)
/// ```
pub fn v2_routes() -> Router<AppState> {
    Router::new().nest("/organizations", platform::organizations_router())
}

/// Build the server-rendered settings page tree.
pub fn settings_routes() -> Router<AppState> {
    Router::new().nest("/organizations", settings::router())
}
