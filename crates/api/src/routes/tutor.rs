//! Route definition for the AI-tutoring chat endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::tutor;
use crate::state::AppState;

/// Routes merged into the `/me` scope.
///
/// ```text
/// POST /ai-chat -> chat
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/ai-chat", post(tutor::chat))
}
