//! REST API client for the voice-AI provider.
//!
//! Wraps the provider's HTTP API (LLM create/get/update, agent update,
//! outbound phone calls) using [`reqwest`].

use async_trait::async_trait;

use crate::config::RetellConfig;
use crate::provider::VoiceAgentProvider;
use crate::types::{AgentUpdate, CreatePhoneCallRequest, LlmRequest, PhoneCall, RetellLlm};

/// Errors from the voice-AI REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum VoiceApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Voice provider API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The configured base URL cannot carry path segments.
    #[error("Invalid voice provider URL: {0}")]
    InvalidUrl(String),

    /// The provider answered successfully but without a field we need.
    #[error("Voice provider returned an incomplete response: {0}")]
    IncompleteResponse(String),
}

/// HTTP client for the voice-AI provider.
pub struct RetellClient {
    client: reqwest::Client,
    config: RetellConfig,
}

impl RetellClient {
    pub fn new(config: RetellConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: RetellConfig) -> Self {
        Self { client, config }
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, VoiceApiError> {
        let base = &self.config.base_url;
        let mut url = reqwest::Url::parse(base)
            .map_err(|e| VoiceApiError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| VoiceApiError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`VoiceApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, VoiceApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(VoiceApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, VoiceApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl VoiceAgentProvider for RetellClient {
    /// `POST /create-retell-llm`
    async fn create_llm(&self, request: &LlmRequest) -> Result<RetellLlm, VoiceApiError> {
        let response = self
            .client
            .post(self.url(&["create-retell-llm"])?)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /get-retell-llm/{llm_id}`
    async fn get_llm(&self, llm_id: &str) -> Result<RetellLlm, VoiceApiError> {
        let response = self
            .client
            .get(self.url(&["get-retell-llm", llm_id])?)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `PATCH /update-retell-llm/{llm_id}`
    async fn update_llm(
        &self,
        llm_id: &str,
        request: &LlmRequest,
    ) -> Result<RetellLlm, VoiceApiError> {
        let response = self
            .client
            .patch(self.url(&["update-retell-llm", llm_id])?)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `PATCH /update-agent/{agent_id}`
    async fn attach_llm_to_agent(&self, llm_websocket_url: &str) -> Result<(), VoiceApiError> {
        let response = self
            .client
            .patch(self.url(&["update-agent", self.config.agent_id.as_str()])?)
            .bearer_auth(&self.config.api_key)
            .json(&AgentUpdate { llm_websocket_url })
            .send()
            .await?;

        Self::ensure_success(response).await?;
        tracing::debug!(agent_id = %self.config.agent_id, "Updated agent websocket URL");
        Ok(())
    }

    /// `POST /v2/create-phone-call`
    async fn create_phone_call(
        &self,
        request: &CreatePhoneCallRequest,
    ) -> Result<PhoneCall, VoiceApiError> {
        let response = self
            .client
            .post(self.url(&["v2", "create-phone-call"])?)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
