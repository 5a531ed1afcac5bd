//! HTTP-level integration tests for the curriculum catalog endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use sqlx::PgPool;

/// Create a course via the API and return its id.
async fn create_course(app: axum::Router, name: &str) -> i64 {
    let body = serde_json::json!({ "name": name, "description": "A course" });
    let response = post_json(app, "/api/v1/courses", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a unit via the API and return its id.
async fn create_unit(app: axum::Router, course_id: i64, order_index: i32) -> i64 {
    let body = serde_json::json!({
        "course_id": course_id,
        "title": format!("Unit {order_index}"),
        "order_index": order_index,
    });
    let response = post_json(app, "/api/v1/units", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn course_shows_its_units_in_order(pool: PgPool) {
    let app = common::build_test_app(pool);

    let course_id = create_course(app.clone(), "Graph Algorithms").await;
    create_unit(app.clone(), course_id, 1).await;
    create_unit(app.clone(), course_id, 2).await;

    let response = get(app, &format!("/api/v1/courses/{course_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Graph Algorithms");
    let units = json["data"]["units"].as_array().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0]["order_index"], 1);
    assert_eq!(units[1]["order_index"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_course_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/courses/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unit_order_gap_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let course_id = create_course(app.clone(), "Gaps").await;
    create_unit(app.clone(), course_id, 1).await;

    let body = serde_json::json!({
        "course_id": course_id,
        "title": "Unit 5",
        "order_index": 5,
    });
    let response = post_json(app, "/api/v1/units", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unit_detail_includes_lesson_and_problems(pool: PgPool) {
    let app = common::build_test_app(pool);

    let course_id = create_course(app.clone(), "Detail").await;
    let unit_id = create_unit(app.clone(), course_id, 1).await;

    let lesson_body = serde_json::json!({
        "unit_id": unit_id,
        "title": "Intro to BFS",
        "content": "Breadth-first search visits...",
    });
    let response = post_json(app.clone(), "/api/v1/lessons", lesson_body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let problem_body = serde_json::json!({
        "unit_id": unit_id,
        "question": "What order does BFS visit?",
        "answer": "Level by level",
    });
    let response = post_json(app.clone(), "/api/v1/practice-problems", problem_body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, &format!("/api/v1/units/{unit_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Unit 1");
    assert_eq!(json["data"]["lesson"]["title"], "Intro to BFS");
    assert_eq!(json["data"]["practice_problems"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn second_lesson_in_a_unit_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let course_id = create_course(app.clone(), "OneLesson").await;
    let unit_id = create_unit(app.clone(), course_id, 1).await;

    let body = serde_json::json!({
        "unit_id": unit_id,
        "title": "First",
        "content": "..",
    });
    let response = post_json(app.clone(), "/api/v1/lessons", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({
        "unit_id": unit_id,
        "title": "Second",
        "content": "..",
    });
    let response = post_json(app, "/api/v1/lessons", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn skill_gain_out_of_range_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let course_id = create_course(app.clone(), "BadGain").await;
    let unit_id = create_unit(app.clone(), course_id, 1).await;

    let skill_body = serde_json::json!({ "name": "bfs", "description": "Traversal" });
    let response = post_json(app.clone(), "/api/v1/skills", skill_body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let skill_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "unit_id": unit_id,
        "title": "Lesson",
        "content": "..",
        "skills": [{ "skill_id": skill_id, "gain": 1.5 }],
    });
    let response = post_json(app, "/api/v1/lessons", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn skills_list_round_trips(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "dijkstra", "description": "Shortest paths" });
    let response = post_json(app.clone(), "/api/v1/skills", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/api/v1/skills").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let skills = json["data"].as_array().unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["name"], "dijkstra");
}
