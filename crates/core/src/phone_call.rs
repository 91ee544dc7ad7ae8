//! AI phone-call prompt templates and input validation.
//!
//! Prompt templates are a closed set: every non-custom template has a
//! canned prompt, and the custom template always requires caller text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a caller-supplied general prompt in characters.
pub const MAX_GENERAL_PROMPT_LENGTH: usize = 10_000;

/// Regex pattern for phone numbers: optional leading `+`, 7 to 15 digits.
pub const PHONE_NUMBER_PATTERN: &str = r"^\+?[0-9]{7,15}$";

static PHONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_NUMBER_PATTERN).expect("valid regex"));

/// Prefix for the per-user rate-limit identifier of phone-call creation.
pub const RATE_LIMIT_IDENTIFIER_PREFIX: &str = "createPhoneCall";

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Prompt template selector sent by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateType {
    CheckInAppointment,
    CustomTemplate,
}

impl TemplateType {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateType::CheckInAppointment => "CHECK_IN_APPOINTMENT",
            TemplateType::CustomTemplate => "CUSTOM_TEMPLATE",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canned prompt for a non-custom template.
#[derive(Debug)]
pub struct PromptTemplate {
    pub template_type: TemplateType,
    pub general_prompt: &'static str,
}

/// Static template table.
pub static PROMPT_TEMPLATES: &[PromptTemplate] = &[PromptTemplate {
    template_type: TemplateType::CheckInAppointment,
    general_prompt: "## You are calling {{name}} from {{company}} on behalf of {{scheduler_name}}.\n\
        Your goal is to schedule a short check-in appointment.\n\
        \n\
        ## Style\n\
        - Be polite, concise and conversational. Ask one question at a time.\n\
        - Never read out raw dates in ISO format; say them naturally.\n\
        \n\
        ## Steps\n\
        1. Greet {{name}} and confirm you are speaking with the right person.\n\
        2. Ask when they are available and use check_availability to find open slots.\n\
        3. Offer up to three open slots and let them choose.\n\
        4. Confirm the slot and their email ({{email}}), then use book_appointment.\n\
        5. Thank them and use end_call once the appointment is booked.",
}];

/// Look up the canned prompt for a template.
pub fn prompt_template(template_type: TemplateType) -> Option<&'static PromptTemplate> {
    PROMPT_TEMPLATES
        .iter()
        .find(|t| t.template_type == template_type)
}

/// Resolve the general prompt the voice agent should use.
///
/// `CUSTOM_TEMPLATE` returns the caller's text verbatim and fails when it
/// is absent or blank. Every other template returns its canned prompt and
/// fails if the template table has no entry for it.
pub fn resolve_general_prompt(
    template_type: TemplateType,
    custom_prompt: Option<&str>,
) -> Result<String, CoreError> {
    match template_type {
        TemplateType::CustomTemplate => match custom_prompt {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(CoreError::Validation(
                "generalPrompt is required for CUSTOM_TEMPLATE".to_string(),
            )),
        },
        other => prompt_template(other)
            .map(|t| t.general_prompt.to_string())
            .ok_or_else(|| {
                CoreError::Validation(format!("No prompt template registered for {other}"))
            }),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Whether `number` looks like a dialable E.164-style phone number.
pub fn is_valid_phone_number(number: &str) -> bool {
    PHONE_NUMBER_RE.is_match(number)
}

/// Validate a caller-supplied general prompt: length check only.
///
/// Length is counted in characters, not bytes.
pub fn validate_general_prompt(text: &str) -> Result<(), CoreError> {
    let len = text.chars().count();
    if len > MAX_GENERAL_PROMPT_LENGTH {
        return Err(CoreError::Validation(format!(
            "General prompt exceeds maximum length of {MAX_GENERAL_PROMPT_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Rate-limit identifier for a user's phone-call creation requests.
pub fn rate_limit_identifier(user_id: crate::types::DbId) -> String {
    format!("{RATE_LIMIT_IDENTIFIER_PREFIX}:{user_id}")
}
