use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pathwise_core::error::CoreError;
use pathwise_db::DbError;
use pathwise_tutor::{ChatError, TutorError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds storage and
/// completion-service variants. Implements [`IntoResponse`] to produce
/// consistent `{ "error", "code" }` JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pathwise-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A completion-service error from `pathwise-tutor`.
    #[error(transparent)]
    Tutor(#[from] TutorError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(e) => AppError::Core(e),
            DbError::Sqlx(e) => AppError::Database(e),
        }
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Core(e) => AppError::Core(e),
            ChatError::Storage(e) => AppError::Database(e),
            ChatError::Client(e) => AppError::Tutor(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::AlreadyCompleted { item, id } => (
                    StatusCode::CONFLICT,
                    "ALREADY_COMPLETED",
                    format!("{item} {id} is already completed"),
                ),
                CoreError::UnitLocked { .. } => (
                    StatusCode::CONFLICT,
                    "UNIT_LOCKED",
                    "This unit is either finished or not unlocked yet".to_string(),
                ),
                CoreError::QuotaExceeded => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "QUOTA_EXCEEDED",
                    "Daily token limit reached".to_string(),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Completion-service errors ---
            AppError::Tutor(err) => classify_tutor_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a completion-service error.
///
/// Timeouts (504) are distinguished from generic transport failures (502)
/// so clients know a retry with a simpler request may help. A non-success
/// upstream status is surfaced as-is rather than masked.
fn classify_tutor_error(err: &TutorError) -> (StatusCode, &'static str, String) {
    match err {
        TutorError::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            "UPSTREAM_TIMEOUT",
            "AI service took too long; simplify the request or try again later".to_string(),
        ),
        TutorError::Transport(e) => {
            tracing::error!(error = %e, "AI service transport failure");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "AI service is unreachable".to_string(),
            )
        }
        TutorError::Upstream { status, body } => {
            let status_code =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status_code,
                "UPSTREAM_ERROR",
                format!("AI error: {body}"),
            )
        }
        TutorError::Payload(msg) => {
            tracing::error!(error = %msg, "AI service returned unexpected payload");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "AI service returned an unexpected response".to_string(),
            )
        }
    }
}
