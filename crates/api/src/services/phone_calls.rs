//! AI phone-call provisioning.
//!
//! [`PhoneCallProvisioner::create_phone_call`] stores the per-event-type
//! configuration, makes sure a voice LLM with the intended prompt exists
//! and is attached to the agent, then places the outbound call.

use std::collections::BTreeMap;

use agenda_core::error::CoreError;
use agenda_core::phone_call::{
    is_valid_phone_number, rate_limit_identifier, resolve_general_prompt,
    validate_general_prompt, TemplateType,
};
use agenda_core::rate_limit::{RateLimitKind, RateLimits};
use agenda_core::types::DbId;
use agenda_db::models::phone_call_config::{PhoneCallConfig, UpsertPhoneCallConfig};
use agenda_db::repositories::PhoneCallConfigRepo;
use agenda_db::DbPool;
use agenda_voice::types::{CreatePhoneCallRequest, GeneralTool, LlmRequest, PhoneCall, RetellLlm};
use agenda_voice::{VoiceAgentProvider, VoiceApiError};
use async_trait::async_trait;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;

/// Request body of `POST /api/v1/organizations/phone-calls`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhoneCall {
    #[validate(custom(function = "validate_phone_number"))]
    pub your_phone_number: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub number_to_call: String,
    #[validate(length(min = 1, message = "calApiKey is required"))]
    pub cal_api_key: String,
    #[validate(range(min = 1, message = "eventTypeId must be positive"))]
    pub event_type_id: DbId,
    pub template_type: TemplateType,
    pub scheduler_name: Option<String>,
    pub guest_name: Option<String>,
    #[validate(email)]
    pub guest_email: Option<String>,
    pub guest_company: Option<String>,
    pub begin_message: Option<String>,
    #[validate(custom(function = "validate_prompt_length"))]
    pub general_prompt: Option<String>,
}

fn validate_phone_number(number: &str) -> Result<(), ValidationError> {
    if is_valid_phone_number(number) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_number"))
    }
}

fn validate_prompt_length(text: &str) -> Result<(), ValidationError> {
    validate_general_prompt(text).map_err(|err| {
        let mut error = ValidationError::new("length");
        error.message = Some(err.to_string().into());
        error
    })
}

/// Persistence needed by the provisioning workflow.
#[async_trait]
pub trait PhoneCallConfigStore: Send + Sync {
    async fn upsert(&self, input: &UpsertPhoneCallConfig) -> Result<PhoneCallConfig, sqlx::Error>;

    async fn set_llm_id(&self, event_type_id: DbId, llm_id: &str) -> Result<bool, sqlx::Error>;
}

/// [`PhoneCallConfigStore`] backed by PostgreSQL.
pub struct PgPhoneCallConfigStore {
    pool: DbPool,
}

impl PgPhoneCallConfigStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhoneCallConfigStore for PgPhoneCallConfigStore {
    async fn upsert(&self, input: &UpsertPhoneCallConfig) -> Result<PhoneCallConfig, sqlx::Error> {
        PhoneCallConfigRepo::upsert(&self.pool, input).await
    }

    async fn set_llm_id(&self, event_type_id: DbId, llm_id: &str) -> Result<bool, sqlx::Error> {
        PhoneCallConfigRepo::set_llm_id(&self.pool, event_type_id, llm_id).await
    }
}

/// Provisions voice LLMs and outbound calls.
pub struct PhoneCallProvisioner<'a> {
    pub store: &'a dyn PhoneCallConfigStore,
    pub voice: &'a dyn VoiceAgentProvider,
    pub rate_limits: &'a RateLimits,
}

impl PhoneCallProvisioner<'_> {
    /// Run the full provisioning workflow for `input` on behalf of `user`.
    ///
    /// Remote failures are returned as-is; a configuration stored before the
    /// failure is kept.
    pub async fn create_phone_call(
        &self,
        user: &AuthUser,
        input: &CreatePhoneCall,
    ) -> AppResult<PhoneCall> {
        if user.org_id.is_none() {
            return Err(CoreError::Unauthorized(
                "You must belong to an organization to create phone calls".into(),
            )
            .into());
        }

        self.rate_limits
            .check(RateLimitKind::Core, &rate_limit_identifier(user.user_id))?;

        input.validate()?;
        let general_prompt =
            resolve_general_prompt(input.template_type, input.general_prompt.as_deref())?;

        let config = self
            .store
            .upsert(&UpsertPhoneCallConfig {
                event_type_id: input.event_type_id,
                template_type: input.template_type,
                scheduler_name: input.scheduler_name.clone(),
                general_prompt: general_prompt.clone(),
                your_phone_number: input.your_phone_number.clone(),
                number_to_call: input.number_to_call.clone(),
                guest_name: input.guest_name.clone(),
                guest_email: input.guest_email.clone(),
                guest_company: input.guest_company.clone(),
                begin_message: input.begin_message.clone(),
                enabled: true,
            })
            .await?;

        let llm_request = LlmRequest {
            general_prompt,
            begin_message: input.begin_message.clone(),
            general_tools: scheduling_tools(&input.cal_api_key, input.event_type_id, &user.time_zone),
        };

        match config.llm_id.as_deref() {
            None => self.provision_llm(input.event_type_id, &llm_request).await?,
            Some(llm_id) => self.sync_llm(llm_id, &llm_request).await?,
        }

        let call = self
            .voice
            .create_phone_call(&CreatePhoneCallRequest {
                from_number: input.your_phone_number.clone(),
                to_number: input.number_to_call.clone(),
                retell_llm_dynamic_variables: dynamic_variables(input),
            })
            .await?;

        tracing::debug!(
            call_id = %call.call_id,
            event_type_id = input.event_type_id,
            "Created outbound phone call",
        );

        Ok(call)
    }

    /// Create a new LLM, attach it to the agent and remember its id.
    async fn provision_llm(&self, event_type_id: DbId, request: &LlmRequest) -> AppResult<()> {
        let llm = self.voice.create_llm(request).await?;
        self.attach(&llm).await?;
        self.store.set_llm_id(event_type_id, &llm.llm_id).await?;

        tracing::info!(event_type_id, llm_id = %llm.llm_id, "Provisioned voice LLM");
        Ok(())
    }

    /// Push `request` to an existing LLM when its prompt or greeting drifted.
    async fn sync_llm(&self, llm_id: &str, request: &LlmRequest) -> AppResult<()> {
        let remote = self.voice.get_llm(llm_id).await?;
        if remote.general_prompt.as_deref() == Some(request.general_prompt.as_str())
            && remote.begin_message == request.begin_message
        {
            return Ok(());
        }

        let updated = self.voice.update_llm(llm_id, request).await?;
        self.attach(&updated).await?;

        tracing::debug!(llm_id, "Updated voice LLM prompt");
        Ok(())
    }

    async fn attach(&self, llm: &RetellLlm) -> AppResult<()> {
        let url = llm.llm_websocket_url.as_deref().ok_or_else(|| {
            VoiceApiError::IncompleteResponse(format!("LLM {} has no websocket URL", llm.llm_id))
        })?;
        self.voice.attach_llm_to_agent(url).await?;
        Ok(())
    }
}

/// Tools the voice agent may call while scheduling.
pub fn scheduling_tools(cal_api_key: &str, event_type_id: DbId, time_zone: &str) -> Vec<GeneralTool> {
    vec![
        GeneralTool::EndCall {
            name: "end_call".to_string(),
            description: "Hang up the call, triggered only after appointment successfully scheduled."
                .to_string(),
        },
        GeneralTool::CheckAvailabilityCal {
            name: "check_availability".to_string(),
            cal_api_key: cal_api_key.to_string(),
            event_type_id,
            timezone: time_zone.to_string(),
        },
        GeneralTool::BookAppointmentCal {
            name: "book_appointment".to_string(),
            cal_api_key: cal_api_key.to_string(),
            event_type_id,
            timezone: time_zone.to_string(),
        },
    ]
}

/// Values for the `{{placeholders}}` of the prompt. Absent fields are omitted.
fn dynamic_variables(input: &CreatePhoneCall) -> BTreeMap<String, String> {
    [
        ("name", &input.guest_name),
        ("email", &input.guest_email),
        ("company", &input.guest_company),
        ("scheduler_name", &input.scheduler_name),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())))
    .collect()
}
