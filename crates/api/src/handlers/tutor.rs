//! Handler for the AI-tutoring chat endpoint.

use axum::extract::State;
use axum::Json;
use pathwise_tutor::ChatRequest;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /me/ai-chat`.
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub user_input: String,
    /// Optional hint about where the user currently is in the curriculum.
    pub current_page: Option<String>,
    /// Set after an incorrect answer so the previous exchange is replayed
    /// as extra context.
    #[serde(default)]
    pub retry_after_incorrect: bool,
}

/// Response body for a tutoring exchange.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub tokens_used: i64,
}

/// POST /api/v1/me/ai-chat
///
/// Runs the full tutoring pipeline: quota check, content-safety check,
/// context assembly, completion call, usage accounting.
pub async fn chat(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<ChatBody>,
) -> AppResult<Json<DataResponse<ChatReply>>> {
    let outcome = state
        .tutor
        .chat(
            user.user_id,
            ChatRequest {
                user_input: body.user_input,
                current_page: body.current_page,
                retry_after_incorrect: body.retry_after_incorrect,
            },
        )
        .await?;

    Ok(Json(DataResponse {
        data: ChatReply {
            reply: outcome.reply,
            tokens_used: outcome.tokens_used,
        },
    }))
}
