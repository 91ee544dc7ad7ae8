//! Request and response payloads of the voice-AI provider API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A tool the voice LLM may invoke during a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneralTool {
    /// Hang up the call.
    EndCall { name: String, description: String },
    /// Look up open slots of a scheduling event type.
    CheckAvailabilityCal {
        name: String,
        cal_api_key: String,
        event_type_id: i64,
        timezone: String,
    },
    /// Book a slot of a scheduling event type.
    BookAppointmentCal {
        name: String,
        cal_api_key: String,
        event_type_id: i64,
        timezone: String,
    },
}

/// Body of the create / update LLM requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LlmRequest {
    pub general_prompt: String,
    pub begin_message: Option<String>,
    pub general_tools: Vec<GeneralTool>,
}

/// A voice LLM as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetellLlm {
    pub llm_id: String,
    #[serde(default)]
    pub llm_websocket_url: Option<String>,
    #[serde(default)]
    pub general_prompt: Option<String>,
    #[serde(default)]
    pub begin_message: Option<String>,
}

/// Body of the agent update request.
#[derive(Debug, Clone, Serialize)]
pub struct AgentUpdate<'a> {
    pub llm_websocket_url: &'a str,
}

/// Body of the outbound phone-call request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePhoneCallRequest {
    pub from_number: String,
    pub to_number: String,
    /// Values substituted into `{{placeholders}}` of the prompt.
    pub retell_llm_dynamic_variables: BTreeMap<String, String>,
}

/// Call object returned by the provider.
///
/// Fields not modelled explicitly are preserved in `extra` so the response
/// can be handed back to clients unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneCall {
    pub call_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
