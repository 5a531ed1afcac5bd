//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pathwise_api::auth::jwt::JwtConfig;
use pathwise_api::config::ServerConfig;
use pathwise_api::router::build_app_router;
use pathwise_api::state::AppState;
use pathwise_tutor::{BlocklistClassifier, InferenceClient, InferenceConfig, TutorService};

/// Build a test `ServerConfig` with safe defaults.
///
/// The inference endpoint points at a closed local port; tests that reach
/// the completion call are expected to stop before the network (quota
/// denial, content refusal) or to assert on the transport failure.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 30,
        },
        inference: InferenceConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            model_id: "test-model".to_string(),
            request_timeout_secs: 1,
        },
        daily_token_limit: 10_000,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the construction in `main.rs` so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let tutor = TutorService::new(
        pool.clone(),
        InferenceClient::new(config.inference.clone()),
        Box::new(BlocklistClassifier::default()),
        config.daily_token_limit,
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        tutor: Arc::new(tutor),
    };

    build_app_router(state, &config)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collection should succeed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Register a user via the API and return `(user_id, access_token)`.
pub async fn register_user(app: Router, email: &str) -> (i64, String) {
    let body = serde_json::json!({
        "first_name": "Test",
        "last_name": "Learner",
        "email": email,
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    let user_id = json["user"]["id"].as_i64().expect("user id");
    let token = json["access_token"].as_str().expect("access token").to_string();
    (user_id, token)
}
