//! Repository for the append-only `prompt_logs` table.

use pathwise_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt_log::PromptLog;

const COLUMNS: &str = "id, user_id, prompt, response, tokens_used, created_at";

pub struct PromptLogRepo;

impl PromptLogRepo {
    /// Append one tutoring exchange. Rows are never updated or deleted.
    pub async fn append(
        pool: &PgPool,
        user_id: DbId,
        prompt: &str,
        response: &str,
        tokens_used: i32,
    ) -> Result<PromptLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompt_logs (user_id, prompt, response, tokens_used) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptLog>(&query)
            .bind(user_id)
            .bind(prompt)
            .bind(response)
            .bind(tokens_used)
            .fetch_one(pool)
            .await
    }

    /// The user's most recent exchange, used as retry context.
    pub async fn latest_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<PromptLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_logs \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, PromptLog>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
