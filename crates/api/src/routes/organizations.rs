//! Route definitions for `/api/v1/organizations`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{attributes, phone_calls};
use crate::state::AppState;

/// Routes mounted at `/api/v1/organizations`.
///
/// ```text
/// POST   /phone-calls                     -> phone_calls::create
///
/// GET    /{org_id}/attributes             -> attributes::list
/// POST   /{org_id}/attributes             -> attributes::create
/// PATCH  /{org_id}/attributes/{id}        -> attributes::update
/// DELETE /{org_id}/attributes/{id}        -> attributes::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/phone-calls", post(phone_calls::create))
        .route(
            "/{org_id}/attributes",
            get(attributes::list).post(attributes::create),
        )
        .route(
            "/{org_id}/attributes/{id}",
            patch(attributes::update).delete(attributes::delete),
        )
}
