/// Default base URL of the voice-AI provider API.
pub const DEFAULT_RETELL_AI_URL: &str = "https://api.retellai.com";

/// Connection settings for the voice-AI provider.
#[derive(Debug, Clone)]
pub struct RetellConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Bearer API key.
    pub api_key: String,
    /// Agent whose LLM websocket URL is repointed after LLM changes.
    pub agent_id: String,
}

impl RetellConfig {
    /// Load provider configuration from environment variables.
    ///
    /// | Env Var              | Required | Default                     |
    /// |----------------------|----------|-----------------------------|
    /// | `RETELL_AI_URL`      | no       | `https://api.retellai.com`  |
    /// | `RETELL_AI_KEY`      | **yes**  | --                          |
    /// | `RETELL_AI_AGENT_ID` | **yes**  | --                          |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing.
    pub fn from_env() -> Self {
        let base_url = std::env::var("RETELL_AI_URL")
            .unwrap_or_else(|_| DEFAULT_RETELL_AI_URL.into())
            .trim_end_matches('/')
            .to_string();
        let api_key = std::env::var("RETELL_AI_KEY").expect("RETELL_AI_KEY must be set");
        let agent_id =
            std::env::var("RETELL_AI_AGENT_ID").expect("RETELL_AI_AGENT_ID must be set");

        Self {
            base_url,
            api_key,
            agent_id,
        }
    }
}
