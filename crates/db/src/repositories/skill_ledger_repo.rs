//! Repository for the `user_skills` mastery ledger.

use std::collections::BTreeMap;

use pathwise_core::mastery;
use pathwise_core::types::DbId;
use sqlx::{PgPool, PgTransaction};

use crate::models::skill::UserSkillLevel;

pub struct SkillLedgerRepo;

impl SkillLedgerRepo {
    /// Award a completed lesson's (skill, gain) pairs to the user.
    ///
    /// One upsert covers every pair: a missing ledger row is created at the
    /// gain value, an existing one is incremented. Gains are positive so
    /// `learning_level` never decreases; no upper clamp is applied. Runs
    /// inside the caller's completion transaction.
    pub async fn apply_lesson_gains(
        tx: &mut PgTransaction<'_>,
        user_id: DbId,
        lesson_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_skills (user_id, skill_id, learning_level) \
             SELECT $1, skill_id, gain FROM lesson_skills WHERE lesson_id = $2 \
             ON CONFLICT (user_id, skill_id) DO UPDATE SET \
                 learning_level = user_skills.learning_level + EXCLUDED.learning_level",
        )
        .bind(user_id)
        .bind(lesson_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Award a completed problem's (skill, gain) pairs to the user.
    pub async fn apply_problem_gains(
        tx: &mut PgTransaction<'_>,
        user_id: DbId,
        problem_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_skills (user_id, skill_id, learning_level) \
             SELECT $1, skill_id, gain FROM problem_skills WHERE problem_id = $2 \
             ON CONFLICT (user_id, skill_id) DO UPDATE SET \
                 learning_level = user_skills.learning_level + EXCLUDED.learning_level",
        )
        .bind(user_id)
        .bind(problem_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Learning-level snapshot across every skill, absent skills at 0.0.
    ///
    /// Backs the tutoring context; never fails for a user with no history.
    pub async fn learning_levels(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<BTreeMap<String, f64>, sqlx::Error> {
        let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
            "SELECT s.name, us.learning_level \
             FROM skills s \
             LEFT JOIN user_skills us ON s.id = us.skill_id AND us.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(mastery::level_snapshot(rows))
    }

    /// The skills a user holds ledger rows for, with names and levels.
    pub async fn user_levels(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserSkillLevel>, sqlx::Error> {
        sqlx::query_as::<_, UserSkillLevel>(
            "SELECT s.id AS skill_id, s.name, s.description, us.learning_level \
             FROM user_skills us \
             JOIN skills s ON s.id = us.skill_id \
             WHERE us.user_id = $1 \
             ORDER BY s.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
