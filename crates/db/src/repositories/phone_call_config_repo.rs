//! Repository for the `ai_phone_call_configurations` table.

use agenda_core::types::DbId;
use sqlx::PgPool;

use crate::models::phone_call_config::{PhoneCallConfig, UpsertPhoneCallConfig};

const COLUMNS: &str = "id, event_type_id, template_type, scheduler_name, general_prompt, \
                       your_phone_number, number_to_call, guest_name, guest_email, guest_company, \
                       begin_message, enabled, llm_id, created_at, updated_at";

/// Provides data access for per-event-type phone-call configuration.
pub struct PhoneCallConfigRepo;

impl PhoneCallConfigRepo {
    /// Insert or update the configuration for `input.event_type_id`.
    ///
    /// Uses `ON CONFLICT (event_type_id) DO UPDATE` to guarantee one row per
    /// event type. Both branches write the same field set; `llm_id` is left
    /// untouched on update.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertPhoneCallConfig,
    ) -> Result<PhoneCallConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_phone_call_configurations (
                event_type_id, template_type, scheduler_name, general_prompt,
                your_phone_number, number_to_call, guest_name, guest_email,
                guest_company, begin_message, enabled)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             ON CONFLICT (event_type_id) DO UPDATE SET
                template_type = EXCLUDED.template_type,
                scheduler_name = EXCLUDED.scheduler_name,
                general_prompt = EXCLUDED.general_prompt,
                your_phone_number = EXCLUDED.your_phone_number,
                number_to_call = EXCLUDED.number_to_call,
                guest_name = EXCLUDED.guest_name,
                guest_email = EXCLUDED.guest_email,
                guest_company = EXCLUDED.guest_company,
                begin_message = EXCLUDED.begin_message,
                enabled = EXCLUDED.enabled
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhoneCallConfig>(&query)
            .bind(input.event_type_id)
            .bind(input.template_type.as_str())
            .bind(&input.scheduler_name)
            .bind(&input.general_prompt)
            .bind(&input.your_phone_number)
            .bind(&input.number_to_call)
            .bind(&input.guest_name)
            .bind(&input.guest_email)
            .bind(&input.guest_company)
            .bind(&input.begin_message)
            .bind(input.enabled)
            .fetch_one(pool)
            .await
    }

    /// Find the configuration of an event type.
    pub async fn find_by_event_type(
        pool: &PgPool,
        event_type_id: DbId,
    ) -> Result<Option<PhoneCallConfig>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM ai_phone_call_configurations WHERE event_type_id = $1");
        sqlx::query_as::<_, PhoneCallConfig>(&query)
            .bind(event_type_id)
            .fetch_optional(pool)
            .await
    }

    /// Record the remote LLM identifier. Returns `true` if the row was updated.
    pub async fn set_llm_id(
        pool: &PgPool,
        event_type_id: DbId,
        llm_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE ai_phone_call_configurations SET llm_id = $2 WHERE event_type_id = $1",
        )
        .bind(event_type_id)
        .bind(llm_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
