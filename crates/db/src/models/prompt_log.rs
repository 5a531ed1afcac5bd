//! Tutoring prompt-log model.

use pathwise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `prompt_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptLog {
    pub id: DbId,
    pub user_id: DbId,
    pub prompt: String,
    pub response: String,
    pub tokens_used: i32,
    pub created_at: Timestamp,
}
