//! Tutoring session pipeline.
//!
//! Order of operations per request: quota check (with lazy reset) →
//! content-safety check → context build → message assembly → completion
//! call → usage accounting + prompt-log append. Only the success path
//! writes usage and log rows; the flagged-content path exits with the
//! canned refusal and zero persisted side effects (beyond a due quota
//! reset, which always sticks).

use pathwise_core::error::CoreError;
use pathwise_core::quota::{self, QuotaStatus};
use pathwise_core::tutor::{self, PriorExchange};
use pathwise_core::types::DbId;
use pathwise_db::repositories::{PromptLogRepo, QuotaRepo, SkillLedgerRepo};
use pathwise_db::{DbError, DbPool};

use crate::client::{InferenceClient, TutorError};
use crate::moderation::ContentClassifier;

/// One inbound tutoring request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Raw user message.
    pub user_input: String,
    /// Optional hint about where the user currently is in the curriculum.
    pub current_page: Option<String>,
    /// Set by the caller when the user just answered a problem incorrectly;
    /// replays the most recent prior exchange as extra context.
    pub retry_after_incorrect: bool,
}

/// The reply handed back to the caller.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    /// Tokens consumed by this request; 0 on the refusal path.
    pub tokens_used: i64,
}

/// Errors from the tutoring pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Client(#[from] TutorError),
}

impl From<DbError> for ChatError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(e) => ChatError::Core(e),
            DbError::Sqlx(e) => ChatError::Storage(e),
        }
    }
}

/// Orchestrates tutoring sessions against the completion service.
pub struct TutorService {
    pool: DbPool,
    client: InferenceClient,
    classifier: Box<dyn ContentClassifier>,
    daily_token_limit: i64,
}

impl TutorService {
    pub fn new(
        pool: DbPool,
        client: InferenceClient,
        classifier: Box<dyn ContentClassifier>,
        daily_token_limit: i64,
    ) -> Self {
        Self {
            pool,
            client,
            classifier,
            daily_token_limit,
        }
    }

    /// Run one tutoring exchange for the user.
    pub async fn chat(&self, user_id: DbId, request: ChatRequest) -> Result<ChatOutcome, ChatError> {
        // Lazy reset fires even when the request is later refused.
        let tokens_used =
            QuotaRepo::reset_if_due(&self.pool, user_id, quota::RESET_WINDOW_HOURS as i32).await?;
        if let QuotaStatus::Exceeded = quota::check(tokens_used, self.daily_token_limit) {
            tracing::warn!(user_id, tokens_used, "Tutoring request denied: quota exceeded");
            return Err(CoreError::QuotaExceeded.into());
        }

        // No-cost rejection path: no model call, no usage, no log entry.
        if self.classifier.is_flagged(&request.user_input) {
            tracing::info!(user_id, "Tutoring request refused by content classifier");
            return Ok(ChatOutcome {
                reply: tutor::REFUSAL_REPLY.to_string(),
                tokens_used: 0,
            });
        }

        let learning_levels = SkillLedgerRepo::learning_levels(&self.pool, user_id).await?;

        let prior_exchange = if request.retry_after_incorrect {
            PromptLogRepo::latest_for_user(&self.pool, user_id)
                .await?
                .map(|log| PriorExchange {
                    prompt: log.prompt,
                    response: log.response,
                })
        } else {
            None
        };

        let system_prompt =
            tutor::build_system_prompt(&learning_levels, request.current_page.as_deref());
        let messages =
            tutor::build_messages(system_prompt, prior_exchange, &request.user_input);

        let completion = self
            .client
            .complete(&messages, tutor::MAX_COMPLETION_TOKENS)
            .await?;

        // Accounting runs in a spawned task so a caller that disconnects
        // after the model answered cannot cancel it away.
        let pool = self.pool.clone();
        let prompt = request.user_input.clone();
        let reply = completion.reply.clone();
        let total_tokens = completion.total_tokens;
        let accounting = tokio::spawn(async move {
            QuotaRepo::record_usage(&pool, user_id, total_tokens).await?;
            PromptLogRepo::append(&pool, user_id, &prompt, &reply, total_tokens as i32).await?;
            Ok::<(), sqlx::Error>(())
        });
        accounting
            .await
            .map_err(|e| CoreError::Internal(format!("accounting task failed: {e}")))??;

        tracing::info!(user_id, total_tokens, "Tutoring exchange completed");
        Ok(ChatOutcome {
            reply: completion.reply,
            tokens_used: completion.total_tokens,
        })
    }
}
