//! Handler for AI phone-call provisioning.

use agenda_voice::types::PhoneCall;
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::phone_calls::{CreatePhoneCall, PgPhoneCallConfigStore, PhoneCallProvisioner};
use crate::state::AppState;

/// POST /api/v1/organizations/phone-calls
///
/// Stores the event type's call configuration, provisions or refreshes its
/// voice LLM and places the call. Returns the provider's call object.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePhoneCall>,
) -> AppResult<Json<DataResponse<PhoneCall>>> {
    let store = PgPhoneCallConfigStore::new(state.pool.clone());
    let provisioner = PhoneCallProvisioner {
        store: &store,
        voice: state.voice.as_ref(),
        rate_limits: &state.rate_limits,
    };

    let call = provisioner.create_phone_call(&user, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        event_type_id = input.event_type_id,
        call_id = %call.call_id,
        "Phone call created",
    );

    Ok(Json(DataResponse { data: call }))
}
