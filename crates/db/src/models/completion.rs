//! Completion record models.

use pathwise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `user_lesson_completions`. At most one per (user, lesson).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserLessonCompletion {
    pub id: DbId,
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub completed_at: Timestamp,
}

/// A row from `user_problem_completions`. At most one per (user, problem).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProblemCompletion {
    pub id: DbId,
    pub user_id: DbId,
    pub problem_id: DbId,
    pub completed_at: Timestamp,
}

/// Everything a user has completed, for the per-user listing endpoint.
#[derive(Debug, Serialize)]
pub struct UserCompletions {
    pub user_id: DbId,
    pub lessons: Vec<UserLessonCompletion>,
    pub practice_problems: Vec<UserProblemCompletion>,
}
