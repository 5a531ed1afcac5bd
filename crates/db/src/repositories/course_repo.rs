//! Repository for the `courses` and `units` tables.

use pathwise_core::error::CoreError;
use pathwise_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseWithUnits, CreateCourse, CreateUnit, Unit};
use crate::DbError;

const COURSE_COLUMNS: &str = "id, name, description, created_at";
const UNIT_COLUMNS: &str = "id, course_id, title, order_index";

pub struct CourseRepo;

impl CourseRepo {
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (name, description) VALUES ($1, $2) RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY name");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// Find a course together with its units in sequence order.
    pub async fn find_with_units(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CourseWithUnits>, sqlx::Error> {
        let Some(course) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let units = Self::list_units(pool, id).await?;
        Ok(Some(CourseWithUnits { course, units }))
    }

    pub async fn list_units(pool: &PgPool, course_id: DbId) -> Result<Vec<Unit>, sqlx::Error> {
        let query = format!(
            "SELECT {UNIT_COLUMNS} FROM units WHERE course_id = $1 ORDER BY order_index"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_unit_by_id(pool: &PgPool, id: DbId) -> Result<Option<Unit>, sqlx::Error> {
        let query = format!("SELECT {UNIT_COLUMNS} FROM units WHERE id = $1");
        sqlx::query_as::<_, Unit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a unit at the next order position in its course.
    ///
    /// The sequencer assumes unit orders form a contiguous 1..N sequence; a
    /// gap would make every later unit permanently unreachable. Creation is
    /// therefore only accepted at `max(order_index) + 1`, checked inside a
    /// transaction against the course's current tail.
    pub async fn create_unit(pool: &PgPool, input: &CreateUnit) -> Result<Unit, DbError> {
        let mut tx = pool.begin().await?;

        let course_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(input.course_id)
                .fetch_one(&mut *tx)
                .await?;
        if !course_exists {
            return Err(CoreError::NotFound {
                entity: "Course",
                id: input.course_id,
            }
            .into());
        }

        let max_order: Option<i32> =
            sqlx::query_scalar("SELECT MAX(order_index) FROM units WHERE course_id = $1")
                .bind(input.course_id)
                .fetch_one(&mut *tx)
                .await?;
        let next_order = max_order.unwrap_or(0) + 1;
        if input.order_index != next_order {
            return Err(CoreError::Validation(format!(
                "Unit order must be contiguous: expected {next_order}, got {}",
                input.order_index
            ))
            .into());
        }

        let query = format!(
            "INSERT INTO units (course_id, title, order_index) \
             VALUES ($1, $2, $3) \
             RETURNING {UNIT_COLUMNS}"
        );
        let unit = sqlx::query_as::<_, Unit>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(input.order_index)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(unit)
    }
}
