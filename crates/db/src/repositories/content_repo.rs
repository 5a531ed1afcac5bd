//! Repository for lessons, practice problems, and their (skill, gain)
//! association tables.

use pathwise_core::error::CoreError;
use pathwise_core::mastery::SkillGain;
use pathwise_core::types::DbId;
use sqlx::{PgPool, PgTransaction};

use crate::models::content::{
    CreateLesson, CreateProblem, Lesson, PracticeProblem, UnitContent,
};
use crate::DbError;

const LESSON_COLUMNS: &str = "id, unit_id, title, content";
const PROBLEM_COLUMNS: &str = "id, unit_id, question, answer";

pub struct ContentRepo;

impl ContentRepo {
    /// Create a lesson with its (skill, gain) pairs in one transaction.
    ///
    /// Each gain must lie in (0, 1]; the unit must not already own a lesson
    /// (`uq_lessons_unit`, surfaced as 409).
    pub async fn create_lesson(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, DbError> {
        validate_gains(&input.skills)?;
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO lessons (unit_id, title, content) \
             VALUES ($1, $2, $3) \
             RETURNING {LESSON_COLUMNS}"
        );
        let lesson = sqlx::query_as::<_, Lesson>(&query)
            .bind(input.unit_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(&mut *tx)
            .await?;

        insert_gains(&mut tx, "lesson_skills", "lesson_id", lesson.id, &input.skills).await?;

        tx.commit().await?;
        Ok(lesson)
    }

    /// Create a practice problem with its (skill, gain) pairs.
    pub async fn create_problem(
        pool: &PgPool,
        input: &CreateProblem,
    ) -> Result<PracticeProblem, DbError> {
        validate_gains(&input.skills)?;
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO practice_problems (unit_id, question, answer) \
             VALUES ($1, $2, $3) \
             RETURNING {PROBLEM_COLUMNS}"
        );
        let problem = sqlx::query_as::<_, PracticeProblem>(&query)
            .bind(input.unit_id)
            .bind(&input.question)
            .bind(&input.answer)
            .fetch_one(&mut *tx)
            .await?;

        insert_gains(
            &mut tx,
            "problem_skills",
            "problem_id",
            problem.id,
            &input.skills,
        )
        .await?;

        tx.commit().await?;
        Ok(problem)
    }

    pub async fn find_lesson_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!("SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_problem_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PracticeProblem>, sqlx::Error> {
        let query = format!("SELECT {PROBLEM_COLUMNS} FROM practice_problems WHERE id = $1");
        sqlx::query_as::<_, PracticeProblem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A unit's lesson plus its practice problems.
    pub async fn unit_content(pool: &PgPool, unit_id: DbId) -> Result<UnitContent, sqlx::Error> {
        let query = format!("SELECT {LESSON_COLUMNS} FROM lessons WHERE unit_id = $1");
        let lesson = sqlx::query_as::<_, Lesson>(&query)
            .bind(unit_id)
            .fetch_optional(pool)
            .await?;

        let query = format!(
            "SELECT {PROBLEM_COLUMNS} FROM practice_problems WHERE unit_id = $1 ORDER BY id"
        );
        let practice_problems = sqlx::query_as::<_, PracticeProblem>(&query)
            .bind(unit_id)
            .fetch_all(pool)
            .await?;

        Ok(UnitContent {
            lesson,
            practice_problems,
        })
    }
}

fn validate_gains(gains: &[SkillGain]) -> Result<(), CoreError> {
    for g in gains {
        if !(g.gain > 0.0 && g.gain <= 1.0) {
            return Err(CoreError::Validation(format!(
                "Skill gain must lie in (0, 1], got {} for skill {}",
                g.gain, g.skill_id
            )));
        }
    }
    Ok(())
}

async fn insert_gains(
    tx: &mut PgTransaction<'_>,
    table: &str,
    item_column: &str,
    item_id: DbId,
    gains: &[SkillGain],
) -> Result<(), sqlx::Error> {
    for g in gains {
        let query =
            format!("INSERT INTO {table} ({item_column}, skill_id, gain) VALUES ($1, $2, $3)");
        sqlx::query(&query)
            .bind(item_id)
            .bind(g.skill_id)
            .bind(g.gain)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
