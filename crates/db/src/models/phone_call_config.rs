//! AI phone-call configuration model and DTOs.

use agenda_core::phone_call::TemplateType;
use agenda_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ai_phone_call_configurations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneCallConfig {
    pub id: DbId,
    pub event_type_id: DbId,
    pub template_type: String,
    pub scheduler_name: Option<String>,
    pub general_prompt: Option<String>,
    pub your_phone_number: String,
    pub number_to_call: String,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_company: Option<String>,
    pub begin_message: Option<String>,
    pub enabled: bool,
    /// Identifier of the remote voice-AI LLM; `None` until provisioned.
    pub llm_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Field set written by both branches of the upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertPhoneCallConfig {
    pub event_type_id: DbId,
    pub template_type: TemplateType,
    pub scheduler_name: Option<String>,
    pub general_prompt: String,
    pub your_phone_number: String,
    pub number_to_call: String,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_company: Option<String>,
    pub begin_message: Option<String>,
    pub enabled: bool,
}
