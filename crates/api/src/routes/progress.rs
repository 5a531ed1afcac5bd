//! Route definitions for the authenticated `/me` progress scope.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/me`. All require a Bearer token.
///
/// ```text
/// GET  /skills                                  -> my_skills
/// GET  /units                                   -> my_units
/// GET  /units/{unit_id}/progress                -> unit_progress
/// GET  /courses/{course_id}/progress            -> course_position
/// GET  /completions                             -> my_completions
/// POST /lessons/{lesson_id}/complete            -> complete_lesson
/// POST /practice-problems/{problem_id}/complete -> complete_problem
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/skills", get(progress::my_skills))
        .route("/units", get(progress::my_units))
        .route("/units/{unit_id}/progress", get(progress::unit_progress))
        .route(
            "/courses/{course_id}/progress",
            get(progress::course_position),
        )
        .route("/completions", get(progress::my_completions))
        .route(
            "/lessons/{lesson_id}/complete",
            post(progress::complete_lesson),
        )
        .route(
            "/practice-problems/{problem_id}/complete",
            post(progress::complete_problem),
        )
}
