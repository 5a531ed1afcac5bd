//! Route definitions.
//!
//! Route hierarchy:
//!
//! ```text
//! /health                                          service + db health
//!
//! /api/v1
//!   /auth
//!     POST /register                               create account
//!     POST /login                                  authenticate
//!   /courses                                       catalog (GET public, POST authoring)
//!   /units, /lessons, /practice-problems, /skills  catalog
//!   /me                                            authenticated user scope
//!     GET  /skills                                 skill ledger
//!     GET  /units                                  started-unit progress
//!     GET  /units/{unit_id}/progress               one unit's percentage
//!     GET  /courses/{course_id}/progress           course cursor position
//!     GET  /completions                            completion records
//!     POST /lessons/{lesson_id}/complete           record lesson completion
//!     POST /practice-problems/{problem_id}/complete
//!     POST /ai-chat                                tutoring exchange
//! ```

pub mod auth;
pub mod catalog;
pub mod health;
pub mod progress;
pub mod tutor;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(catalog::router())
        .nest("/me", progress::router().merge(tutor::router()))
}
