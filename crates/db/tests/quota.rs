//! Integration tests for the daily token quota and the prompt log.

use assert_matches::assert_matches;
use pathwise_core::error::CoreError;
use pathwise_core::quota::RESET_WINDOW_HOURS;
use pathwise_db::models::user::{CreateUser, User};
use pathwise_db::repositories::{PromptLogRepo, QuotaRepo, UserRepo};
use pathwise_db::DbError;
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            first_name: "Quota".to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Push a user's `last_reset` into the past by the given number of hours.
async fn age_last_reset(pool: &PgPool, user_id: i64, hours: i32) {
    sqlx::query(
        "UPDATE users SET last_reset = last_reset - make_interval(hours => $2) WHERE id = $1",
    )
    .bind(user_id)
    .bind(hours)
    .execute(pool)
    .await
    .expect("update should succeed");
}

// ---------------------------------------------------------------------------
// Quota counter
// ---------------------------------------------------------------------------

/// A fresh user starts at zero used tokens.
#[sqlx::test(migrations = "./migrations")]
async fn fresh_user_has_zero_usage(pool: PgPool) {
    let user = seed_user(&pool, "fresh@test.com").await;

    let used = QuotaRepo::reset_if_due(&pool, user.id, RESET_WINDOW_HOURS as i32)
        .await
        .expect("quota query should succeed");
    assert_eq!(used, 0);
}

/// Recorded usage accumulates within the window.
#[sqlx::test(migrations = "./migrations")]
async fn usage_accumulates_within_the_window(pool: PgPool) {
    let user = seed_user(&pool, "accumulate@test.com").await;

    QuotaRepo::record_usage(&pool, user.id, 120)
        .await
        .expect("recording usage should succeed");
    QuotaRepo::record_usage(&pool, user.id, 380)
        .await
        .expect("recording usage should succeed");

    let used = QuotaRepo::reset_if_due(&pool, user.id, RESET_WINDOW_HOURS as i32)
        .await
        .expect("quota query should succeed");
    assert_eq!(used, 500);
}

/// The counter resets once more than 24 hours have passed.
#[sqlx::test(migrations = "./migrations")]
async fn counter_resets_after_the_window_elapses(pool: PgPool) {
    let user = seed_user(&pool, "elapsed@test.com").await;

    QuotaRepo::record_usage(&pool, user.id, 5000)
        .await
        .expect("recording usage should succeed");
    age_last_reset(&pool, user.id, 25).await;

    let used = QuotaRepo::reset_if_due(&pool, user.id, RESET_WINDOW_HOURS as i32)
        .await
        .expect("quota query should succeed");
    assert_eq!(used, 0, "an elapsed window must zero the counter");

    // last_reset moved forward, so a second call does not reset again.
    QuotaRepo::record_usage(&pool, user.id, 42)
        .await
        .expect("recording usage should succeed");
    let used = QuotaRepo::reset_if_due(&pool, user.id, RESET_WINDOW_HOURS as i32)
        .await
        .expect("quota query should succeed");
    assert_eq!(used, 42);
}

/// Inside the window the counter is left alone.
#[sqlx::test(migrations = "./migrations")]
async fn counter_survives_within_the_window(pool: PgPool) {
    let user = seed_user(&pool, "inside@test.com").await;

    QuotaRepo::record_usage(&pool, user.id, 9000)
        .await
        .expect("recording usage should succeed");
    age_last_reset(&pool, user.id, 23).await;

    let used = QuotaRepo::reset_if_due(&pool, user.id, RESET_WINDOW_HOURS as i32)
        .await
        .expect("quota query should succeed");
    assert_eq!(used, 9000);
}

/// Quota operations on a nonexistent user report NotFound.
#[sqlx::test(migrations = "./migrations")]
async fn missing_user_is_not_found(pool: PgPool) {
    let err = QuotaRepo::reset_if_due(&pool, 9999, RESET_WINDOW_HOURS as i32)
        .await
        .expect_err("missing user must be rejected");
    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "User", id: 9999 }));
}

// ---------------------------------------------------------------------------
// Prompt log
// ---------------------------------------------------------------------------

/// Appended exchanges come back in order; the latest is the retry context.
#[sqlx::test(migrations = "./migrations")]
async fn latest_prompt_log_entry_wins(pool: PgPool) {
    let user = seed_user(&pool, "log@test.com").await;

    PromptLogRepo::append(&pool, user.id, "What is BFS?", "Breadth-first search...", 210)
        .await
        .expect("append should succeed");
    PromptLogRepo::append(&pool, user.id, "And DFS?", "Depth-first search...", 180)
        .await
        .expect("append should succeed");

    let latest = PromptLogRepo::latest_for_user(&pool, user.id)
        .await
        .expect("query should succeed")
        .expect("a log entry should exist");
    assert_eq!(latest.prompt, "And DFS?");
    assert_eq!(latest.response, "Depth-first search...");
    assert_eq!(latest.tokens_used, 180);
}

/// A user with no history has no retry context.
#[sqlx::test(migrations = "./migrations")]
async fn empty_log_yields_no_context(pool: PgPool) {
    let user = seed_user(&pool, "nolog@test.com").await;

    let latest = PromptLogRepo::latest_for_user(&pool, user.id)
        .await
        .expect("query should succeed");
    assert!(latest.is_none());
}
