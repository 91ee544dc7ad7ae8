use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings/organizations`.
///
/// ```text
/// GET    /{org_id}/attributes             -> settings::attributes_page
/// POST   /{org_id}/attributes             -> settings::create_attribute_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{org_id}/attributes",
        get(settings::attributes_page).post(settings::create_attribute_form),
    )
}
