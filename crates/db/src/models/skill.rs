//! Skill reference data and per-user ledger rows.

use pathwise_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `skills` table. Immutable reference data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub name: String,
    pub description: String,
}

/// DTO for creating a skill.
#[derive(Debug, Deserialize)]
pub struct CreateSkill {
    pub name: String,
    pub description: String,
}

/// A user's ledger entry for one skill, joined with the skill's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSkillLevel {
    pub skill_id: DbId,
    pub name: String,
    pub description: String,
    pub learning_level: f64,
}
