//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource area.
//! Handlers delegate to the repositories in `pathwise_db` (or to the
//! tutoring service) and map errors via [`crate::error::AppError`].

pub mod auth;
pub mod catalog;
pub mod progress;
pub mod tutor;
