//! Lesson and practice-problem models and DTOs.

use pathwise_core::mastery::SkillGain;
use pathwise_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `lessons` table. Every unit owns exactly one lesson.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub unit_id: DbId,
    pub title: String,
    pub content: String,
}

/// DTO for creating a lesson with its attached (skill, gain) pairs.
#[derive(Debug, Deserialize)]
pub struct CreateLesson {
    pub unit_id: DbId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub skills: Vec<SkillGain>,
}

/// A row from the `practice_problems` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PracticeProblem {
    pub id: DbId,
    pub unit_id: DbId,
    pub question: String,
    pub answer: String,
}

/// DTO for creating a practice problem with its attached (skill, gain) pairs.
#[derive(Debug, Deserialize)]
pub struct CreateProblem {
    pub unit_id: DbId,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub skills: Vec<SkillGain>,
}

/// A unit's full content: the lesson (absent while the unit is still being
/// authored) plus its practice problems.
#[derive(Debug, Serialize)]
pub struct UnitContent {
    pub lesson: Option<Lesson>,
    pub practice_problems: Vec<PracticeProblem>,
}
