//! HTTP-level integration tests for the authenticated progress endpoints:
//! completion recording, unlocking, percentages, and the skill ledger.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get_auth, post_json, post_json_auth, register_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    course_id: i64,
    unit_ids: Vec<i64>,
    lesson_ids: Vec<i64>,
}

/// Build a course with `units` units, each holding one lesson, via the API.
async fn seed_course(app: Router, name: &str, units: usize) -> Fixture {
    let body = serde_json::json!({ "name": name, "description": "A course" });
    let response = post_json(app.clone(), "/api/v1/courses", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let course_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let mut unit_ids = Vec::new();
    let mut lesson_ids = Vec::new();
    for order in 1..=units {
        let body = serde_json::json!({
            "course_id": course_id,
            "title": format!("Unit {order}"),
            "order_index": order,
        });
        let response = post_json(app.clone(), "/api/v1/units", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let unit_id = body_json(response).await["data"]["id"].as_i64().unwrap();

        let body = serde_json::json!({
            "unit_id": unit_id,
            "title": format!("Lesson {order}"),
            "content": "...",
        });
        let response = post_json(app.clone(), "/api/v1/lessons", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let lesson_id = body_json(response).await["data"]["id"].as_i64().unwrap();

        unit_ids.push(unit_id);
        lesson_ids.push(lesson_id);
    }

    Fixture {
        course_id,
        unit_ids,
        lesson_ids,
    }
}

/// Create a practice problem in a unit and return its id.
async fn seed_problem(app: Router, unit_id: i64, skills: serde_json::Value) -> i64 {
    let body = serde_json::json!({
        "unit_id": unit_id,
        "question": "?",
        "answer": "!",
        "skills": skills,
    });
    let response = post_json(app, "/api/v1/practice-problems", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Completion flow
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn completing_a_lesson_reports_progress(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(app.clone(), "flow@test.com").await;
    let fx = seed_course(app.clone(), "Flow", 2).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/me/lessons/{}/complete", fx.lesson_ids[0]),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"]["completion_percentage"], 100);
    assert_eq!(json["data"]["progress"]["unit_completed"], true);
    assert_eq!(json["data"]["progress"]["current_order"], 2);
    assert_eq!(json["data"]["completion"]["lesson_id"], fx.lesson_ids[0]);

    // The course position endpoint reflects the advance.
    let response = get_auth(
        app,
        &format!("/api/v1/me/courses/{}/progress", fx.course_id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_order"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn locked_unit_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(app.clone(), "locked@test.com").await;
    let fx = seed_course(app.clone(), "Locked", 2).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/me/lessons/{}/complete", fx.lesson_ids[1]),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNIT_LOCKED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_completion_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(app.clone(), "dup@test.com").await;
    let fx = seed_course(app.clone(), "Dup", 1).await;
    // A problem keeps the unit open after the lesson is done.
    seed_problem(app.clone(), fx.unit_ids[0], serde_json::json!([])).await;

    let uri = format!("/api/v1/me/lessons/{}/complete", fx.lesson_ids[0]);
    let response = post_json_auth(app.clone(), &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "ALREADY_COMPLETED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn completing_a_missing_problem_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(app.clone(), "missing@test.com").await;

    let response = post_json_auth(
        app,
        "/api/v1/me/practice-problems/9999/complete",
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Progress queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unit_progress_floors_the_percentage(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(app.clone(), "floor@test.com").await;
    let fx = seed_course(app.clone(), "Floor", 1).await;
    seed_problem(app.clone(), fx.unit_ids[0], serde_json::json!([])).await;
    seed_problem(app.clone(), fx.unit_ids[0], serde_json::json!([])).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/me/lessons/{}/complete", fx.lesson_ids[0]),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(
        app,
        &format!("/api/v1/me/units/{}/progress", fx.unit_ids[0]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // 1 of 3 parts done: floor(100 / 3) = 33.
    assert_eq!(json["data"]["completion_percentage"], 33);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn fresh_user_sits_at_the_first_unit(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(app.clone(), "fresh@test.com").await;
    let fx = seed_course(app.clone(), "Fresh", 2).await;

    let response = get_auth(
        app,
        &format!("/api/v1/me/courses/{}/progress", fx.course_id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_order"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn completions_listing_shows_history(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = register_user(app.clone(), "history@test.com").await;
    let fx = seed_course(app.clone(), "History", 1).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/me/lessons/{}/complete", fx.lesson_ids[0]),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/me/completions", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user_id);
    assert_eq!(json["data"]["lessons"].as_array().unwrap().len(), 1);
    assert!(json["data"]["practice_problems"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn skill_ledger_reflects_gains(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(app.clone(), "ledger@test.com").await;

    let response = post_json(
        app.clone(),
        "/api/v1/skills",
        serde_json::json!({ "name": "bfs", "description": "Traversal" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let skill_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let fx = seed_course(app.clone(), "Ledger", 1).await;
    let problem_id = seed_problem(
        app.clone(),
        fx.unit_ids[0],
        serde_json::json!([{ "skill_id": skill_id, "gain": 0.3 }]),
    )
    .await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/me/practice-problems/{problem_id}/complete"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/me/skills", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let skills = json["data"].as_array().unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["name"], "bfs");
    assert!((skills[0]["learning_level"].as_f64().unwrap() - 0.3).abs() < 1e-9);
}
