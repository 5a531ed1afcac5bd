//! HTTP client for the remote chat-completion API.
//!
//! Speaks the OpenAI-style `/v1/chat/completions` wire format using
//! [`reqwest`], with a hard per-request timeout. Timeouts, transport
//! failures, and non-2xx upstream responses are distinguished so callers
//! can tell a retryable failure from an upstream rejection.

use pathwise_core::tutor::ChatTurn;
use serde::Deserialize;

/// Default hard timeout for a completion call, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the completion service.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Base URL, e.g. `https://inference.example.com`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model identifier to request.
    pub model_id: String,
    /// Hard timeout per completion call, in seconds.
    pub request_timeout_secs: u64,
}

/// Errors from the completion-service client.
#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    /// The call exceeded the configured timeout.
    #[error("AI service took too long; simplify the request or try again later")]
    Timeout,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("AI service request failed: {0}")]
    Transport(reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("AI service error ({status}): {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The 2xx response body did not contain a reply.
    #[error("AI service returned an unexpected payload: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for TutorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TutorError::Timeout
        } else {
            TutorError::Transport(err)
        }
    }
}

/// A successful completion: the reply text plus total token consumption
/// (prompt + completion) as reported by the service.
#[derive(Debug, Clone)]
pub struct Completion {
    pub reply: String,
    pub total_tokens: i64,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: i64,
}

/// Client for one completion-service endpoint.
pub struct InferenceClient {
    client: reqwest::Client,
    config: InferenceConfig,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Request a completion for the given conversation turns.
    pub async fn complete(
        &self,
        messages: &[ChatTurn],
        max_tokens: u32,
    ) -> Result<Completion, TutorError> {
        let body = serde_json::json!({
            "model": self.config.model_id,
            "messages": messages,
            "max_tokens": max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .timeout(std::time::Duration::from_secs(
                self.config.request_timeout_secs,
            ))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TutorError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| TutorError::Payload(e.to_string()))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| TutorError::Payload("response contained no choices".to_string()))?;

        Ok(Completion {
            reply,
            total_tokens: parsed.usage.total_tokens,
        })
    }
}
