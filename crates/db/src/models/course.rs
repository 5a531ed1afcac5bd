//! Course and unit models and DTOs.

use pathwise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// DTO for creating a course.
#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    pub description: String,
}

/// A row from the `units` table.
///
/// `order_index` is 1-based and unique within the course; units form a
/// contiguous sequence (enforced at creation).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Unit {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub order_index: i32,
}

/// DTO for creating a unit.
#[derive(Debug, Deserialize)]
pub struct CreateUnit {
    pub course_id: DbId,
    pub title: String,
    pub order_index: i32,
}

/// A course together with its ordered units.
#[derive(Debug, Serialize)]
pub struct CourseWithUnits {
    #[serde(flatten)]
    pub course: Course,
    pub units: Vec<Unit>,
}
