//! Route definitions for curriculum catalog resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted directly under `/api/v1`.
///
/// ```text
/// GET  /courses                 -> list_courses
/// POST /courses                 -> create_course
/// GET  /courses/{id}            -> get_course (with units)
/// POST /units                   -> create_unit
/// GET  /units/{id}              -> get_unit (with content)
/// POST /lessons                 -> create_lesson
/// GET  /lessons/{id}            -> get_lesson
/// POST /practice-problems       -> create_problem
/// GET  /practice-problems/{id}  -> get_problem
/// GET  /skills                  -> list_skills
/// POST /skills                  -> create_skill
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/courses",
            get(catalog::list_courses).post(catalog::create_course),
        )
        .route("/courses/{id}", get(catalog::get_course))
        .route("/units", post(catalog::create_unit))
        .route("/units/{id}", get(catalog::get_unit))
        .route("/lessons", post(catalog::create_lesson))
        .route("/lessons/{id}", get(catalog::get_lesson))
        .route("/practice-problems", post(catalog::create_problem))
        .route("/practice-problems/{id}", get(catalog::get_problem))
        .route(
            "/skills",
            get(catalog::list_skills).post(catalog::create_skill),
        )
}
