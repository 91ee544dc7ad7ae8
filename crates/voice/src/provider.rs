use async_trait::async_trait;

use crate::client::VoiceApiError;
use crate::types::{CreatePhoneCallRequest, LlmRequest, PhoneCall, RetellLlm};

/// Operations the platform needs from a voice-AI phone agent provider.
#[async_trait]
pub trait VoiceAgentProvider: Send + Sync {
    /// Create a new voice LLM.
    async fn create_llm(&self, request: &LlmRequest) -> Result<RetellLlm, VoiceApiError>;

    /// Fetch the current state of a voice LLM.
    async fn get_llm(&self, llm_id: &str) -> Result<RetellLlm, VoiceApiError>;

    /// Replace the prompt, greeting and tools of a voice LLM.
    async fn update_llm(&self, llm_id: &str, request: &LlmRequest)
        -> Result<RetellLlm, VoiceApiError>;

    /// Point the configured agent at an LLM websocket URL.
    async fn attach_llm_to_agent(&self, llm_websocket_url: &str) -> Result<(), VoiceApiError>;

    /// Place an outbound call.
    async fn create_phone_call(
        &self,
        request: &CreatePhoneCallRequest,
    ) -> Result<PhoneCall, VoiceApiError>;
}
