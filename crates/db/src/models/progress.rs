//! Sequencing-cursor and unit-progress models.

use pathwise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `user_course_progress`: the user's cursor within a course.
///
/// Absence of a row means the user sits at order 1. `current_order` is
/// monotonically non-decreasing and advances by exactly 1 per completed
/// unit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserCourseProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub current_order: i32,
    pub last_updated: Timestamp,
}

/// Computed per-unit progress for one user (not a stored row).
#[derive(Debug, Clone, Serialize)]
pub struct UnitProgress {
    pub user_id: DbId,
    pub unit_id: DbId,
    pub completion_percentage: i32,
    pub last_updated: Timestamp,
}

/// Result of recording a completion: the unit's fresh percentage and the
/// cursor state after any advance.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub completion_percentage: i32,
    pub unit_completed: bool,
    pub current_order: i32,
}
