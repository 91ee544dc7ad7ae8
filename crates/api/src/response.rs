//! Shared response envelope types for API handlers.
//!
//! `/api/v1` responses use a `{ "data": ... }` envelope; the `/v2`
//! platform API additionally carries a `status` field.

use serde::Serialize;

/// Status value of a successful `/v2` response.
pub const SUCCESS_STATUS: &str = "success";

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Platform `{ "status": "success", "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: SUCCESS_STATUS,
            data,
        }
    }
}
