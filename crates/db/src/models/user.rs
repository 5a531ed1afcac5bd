//! User account model and DTOs.

use pathwise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// `tokens_used` and `last_reset` carry the daily AI-tutoring quota state:
/// the counter resets lazily once the 24h window since `last_reset` elapses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub tokens_used: i64,
    pub last_reset: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for inserting a new user (password already hashed).
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}
