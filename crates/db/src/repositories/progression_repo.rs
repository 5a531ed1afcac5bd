//! Completion recording and course sequencing.
//!
//! `ProgressionRepo` applies a completion event as a single transaction:
//! duplicate check, order gate, completion insert, skill-gain upserts,
//! percentage recompute, and (when the unit reaches 100%) the cursor
//! advance. A failure at any point rolls the whole event back, so a
//! completion record without its gains or its cursor advance is never
//! observable.
//!
//! The progress row is materialized at order 1 on first touch and locked
//! `FOR UPDATE`, which serializes concurrent completions from the same user
//! within one course.

use chrono::Utc;
use pathwise_core::error::CoreError;
use pathwise_core::types::DbId;
use pathwise_core::{progress, sequencer};
use sqlx::{PgConnection, PgPool, PgTransaction};

use crate::models::completion::{UserCompletions, UserLessonCompletion, UserProblemCompletion};
use crate::models::course::Unit;
use crate::models::progress::{ProgressSnapshot, UnitProgress, UserCourseProgress};
use crate::DbError;

const UNIT_COLUMNS: &str = "id, course_id, title, order_index";
const LESSON_COMPLETION_COLUMNS: &str = "id, user_id, lesson_id, completed_at";
const PROBLEM_COMPLETION_COLUMNS: &str = "id, user_id, problem_id, completed_at";
const PROGRESS_COLUMNS: &str = "id, user_id, course_id, current_order, last_updated";

/// Completion counts for one (user, unit) pair.
struct UnitState {
    lesson_completed: bool,
    problems_completed: i64,
    problem_count: i64,
}

impl UnitState {
    fn percentage(&self) -> i32 {
        progress::completion_percentage(
            self.lesson_completed,
            self.problems_completed,
            self.problem_count,
        )
    }

    fn is_complete(&self) -> bool {
        progress::is_unit_complete(
            self.lesson_completed,
            self.problems_completed,
            self.problem_count,
        )
    }
}

pub struct ProgressionRepo;

impl ProgressionRepo {
    /// Record a lesson completion for the user.
    ///
    /// Rejects with [`CoreError::AlreadyCompleted`] on a duplicate and with
    /// [`CoreError::UnitLocked`] when the lesson's unit is not the one the
    /// user's course cursor points at.
    pub async fn complete_lesson(
        pool: &PgPool,
        user_id: DbId,
        lesson_id: DbId,
    ) -> Result<(UserLessonCompletion, ProgressSnapshot), DbError> {
        let mut tx = pool.begin().await?;

        let unit_id: DbId = sqlx::query_scalar("SELECT unit_id FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Lesson",
                id: lesson_id,
            })?;
        let unit = fetch_unit(&mut tx, unit_id).await?;

        let duplicate: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_lesson_completions \
             WHERE user_id = $1 AND lesson_id = $2)",
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_one(&mut *tx)
        .await?;
        if duplicate {
            return Err(CoreError::AlreadyCompleted {
                item: "Lesson",
                id: lesson_id,
            }
            .into());
        }

        let current_order = lock_cursor(&mut tx, user_id, unit.course_id).await?;
        sequencer::check_unit_unlocked(Some(current_order), unit.order_index)?;

        let query = format!(
            "INSERT INTO user_lesson_completions (user_id, lesson_id) \
             VALUES ($1, $2) \
             RETURNING {LESSON_COMPLETION_COLUMNS}"
        );
        let completion = sqlx::query_as::<_, UserLessonCompletion>(&query)
            .bind(user_id)
            .bind(lesson_id)
            .fetch_one(&mut *tx)
            .await?;

        super::SkillLedgerRepo::apply_lesson_gains(&mut tx, user_id, lesson_id).await?;

        let snapshot = finish_completion(&mut tx, user_id, &unit, current_order).await?;
        tx.commit().await?;

        tracing::info!(
            user_id,
            lesson_id,
            unit_id = unit.id,
            completion_percentage = snapshot.completion_percentage,
            unit_completed = snapshot.unit_completed,
            "Lesson completed",
        );
        Ok((completion, snapshot))
    }

    /// Record a practice-problem completion for the user.
    ///
    /// Same gating and atomicity as [`Self::complete_lesson`].
    pub async fn complete_problem(
        pool: &PgPool,
        user_id: DbId,
        problem_id: DbId,
    ) -> Result<(UserProblemCompletion, ProgressSnapshot), DbError> {
        let mut tx = pool.begin().await?;

        let unit_id: DbId =
            sqlx::query_scalar("SELECT unit_id FROM practice_problems WHERE id = $1")
                .bind(problem_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "PracticeProblem",
                    id: problem_id,
                })?;
        let unit = fetch_unit(&mut tx, unit_id).await?;

        let duplicate: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_problem_completions \
             WHERE user_id = $1 AND problem_id = $2)",
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_one(&mut *tx)
        .await?;
        if duplicate {
            return Err(CoreError::AlreadyCompleted {
                item: "PracticeProblem",
                id: problem_id,
            }
            .into());
        }

        let current_order = lock_cursor(&mut tx, user_id, unit.course_id).await?;
        sequencer::check_unit_unlocked(Some(current_order), unit.order_index)?;

        let query = format!(
            "INSERT INTO user_problem_completions (user_id, problem_id) \
             VALUES ($1, $2) \
             RETURNING {PROBLEM_COMPLETION_COLUMNS}"
        );
        let completion = sqlx::query_as::<_, UserProblemCompletion>(&query)
            .bind(user_id)
            .bind(problem_id)
            .fetch_one(&mut *tx)
            .await?;

        super::SkillLedgerRepo::apply_problem_gains(&mut tx, user_id, problem_id).await?;

        let snapshot = finish_completion(&mut tx, user_id, &unit, current_order).await?;
        tx.commit().await?;

        tracing::info!(
            user_id,
            problem_id,
            unit_id = unit.id,
            completion_percentage = snapshot.completion_percentage,
            unit_completed = snapshot.unit_completed,
            "Practice problem completed",
        );
        Ok((completion, snapshot))
    }

    /// Current completion percentage of one unit for one user.
    pub async fn unit_progress(
        pool: &PgPool,
        user_id: DbId,
        unit_id: DbId,
    ) -> Result<UnitProgress, DbError> {
        let query = format!("SELECT {UNIT_COLUMNS} FROM units WHERE id = $1");
        let unit = sqlx::query_as::<_, Unit>(&query)
            .bind(unit_id)
            .fetch_optional(pool)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Unit",
                id: unit_id,
            })?;

        let mut conn = pool.acquire().await?;
        let state = unit_state(&mut conn, user_id, unit.id).await?;

        Ok(UnitProgress {
            user_id,
            unit_id: unit.id,
            completion_percentage: state.percentage(),
            last_updated: Utc::now(),
        })
    }

    /// Progress for every unit the user has touched (has any completion in).
    pub async fn started_units(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UnitProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {UNIT_COLUMNS} FROM units WHERE id IN ( \
                 SELECT l.unit_id FROM user_lesson_completions ulc \
                 JOIN lessons l ON l.id = ulc.lesson_id WHERE ulc.user_id = $1 \
                 UNION \
                 SELECT pp.unit_id FROM user_problem_completions upc \
                 JOIN practice_problems pp ON pp.id = upc.problem_id WHERE upc.user_id = $1 \
             ) ORDER BY id"
        );
        let units = sqlx::query_as::<_, Unit>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let mut conn = pool.acquire().await?;
        let mut result = Vec::with_capacity(units.len());
        for unit in units {
            let state = unit_state(&mut conn, user_id, unit.id).await?;
            result.push(UnitProgress {
                user_id,
                unit_id: unit.id,
                completion_percentage: state.percentage(),
                last_updated: Utc::now(),
            });
        }
        Ok(result)
    }

    /// Every completion record the user holds.
    pub async fn completions(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<UserCompletions, sqlx::Error> {
        let query = format!(
            "SELECT {LESSON_COMPLETION_COLUMNS} FROM user_lesson_completions \
             WHERE user_id = $1 ORDER BY completed_at"
        );
        let lessons = sqlx::query_as::<_, UserLessonCompletion>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let query = format!(
            "SELECT {PROBLEM_COMPLETION_COLUMNS} FROM user_problem_completions \
             WHERE user_id = $1 ORDER BY completed_at"
        );
        let practice_problems = sqlx::query_as::<_, UserProblemCompletion>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(UserCompletions {
            user_id,
            lessons,
            practice_problems,
        })
    }

    /// The stored cursor row for a (user, course) pair, if any.
    pub async fn course_progress(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Option<UserCourseProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_course_progress \
             WHERE user_id = $1 AND course_id = $2"
        );
        sqlx::query_as::<_, UserCourseProgress>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }
}

async fn fetch_unit(tx: &mut PgTransaction<'_>, unit_id: DbId) -> Result<Unit, DbError> {
    let query = format!("SELECT {UNIT_COLUMNS} FROM units WHERE id = $1");
    let unit = sqlx::query_as::<_, Unit>(&query)
        .bind(unit_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Unit",
            id: unit_id,
        })?;
    Ok(unit)
}

/// Materialize the (user, course) cursor at order 1 if absent, then lock it
/// for the rest of the transaction. The insert rolls back with the
/// transaction, so a rejected attempt still leaves "no row = order 1".
async fn lock_cursor(
    tx: &mut PgTransaction<'_>,
    user_id: DbId,
    course_id: DbId,
) -> Result<i32, sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_course_progress (user_id, course_id) VALUES ($1, $2) \
         ON CONFLICT ON CONSTRAINT uq_user_course_progress DO NOTHING",
    )
    .bind(user_id)
    .bind(course_id)
    .execute(&mut **tx)
    .await?;

    sqlx::query_scalar(
        "SELECT current_order FROM user_course_progress \
         WHERE user_id = $1 AND course_id = $2 \
         FOR UPDATE",
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_one(&mut **tx)
    .await
}

/// Recompute the unit's percentage after the triggering insert and advance
/// the cursor when the unit just reached 100%. The strict order gate means
/// this fires at most once per (user, unit).
async fn finish_completion(
    tx: &mut PgTransaction<'_>,
    user_id: DbId,
    unit: &Unit,
    current_order: i32,
) -> Result<ProgressSnapshot, sqlx::Error> {
    let state = unit_state(&mut **tx, user_id, unit.id).await?;
    let unit_completed = state.is_complete();

    let current_order = if unit_completed {
        let advanced = sequencer::advanced_order(unit.order_index);
        sqlx::query(
            "UPDATE user_course_progress \
             SET current_order = $3, last_updated = NOW() \
             WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(unit.course_id)
        .bind(advanced)
        .execute(&mut **tx)
        .await?;
        advanced
    } else {
        current_order
    };

    Ok(ProgressSnapshot {
        completion_percentage: state.percentage(),
        unit_completed,
        current_order,
    })
}

async fn unit_state(
    conn: &mut PgConnection,
    user_id: DbId,
    unit_id: DbId,
) -> Result<UnitState, sqlx::Error> {
    let lesson_completed: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM user_lesson_completions ulc \
         JOIN lessons l ON l.id = ulc.lesson_id \
         WHERE ulc.user_id = $1 AND l.unit_id = $2)",
    )
    .bind(user_id)
    .bind(unit_id)
    .fetch_one(&mut *conn)
    .await?;

    let problem_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM practice_problems WHERE unit_id = $1")
            .bind(unit_id)
            .fetch_one(&mut *conn)
            .await?;

    let problems_completed: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_problem_completions upc \
         JOIN practice_problems pp ON pp.id = upc.problem_id \
         WHERE upc.user_id = $1 AND pp.unit_id = $2",
    )
    .bind(user_id)
    .bind(unit_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(UnitState {
        lesson_completed,
        problems_completed,
        problem_count,
    })
}
