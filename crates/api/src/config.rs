use pathwise_core::quota::DAILY_TOKEN_LIMIT;
use pathwise_tutor::client::DEFAULT_REQUEST_TIMEOUT_SECS;
use pathwise_tutor::InferenceConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. No global mutable state: the struct is built once at
/// startup and passed to whoever needs it.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`; must exceed the
    /// completion-call timeout or tutoring requests die at the edge first).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Completion-service connection settings.
    pub inference: InferenceConfig,
    /// Daily AI-tutoring token budget per user.
    pub daily_token_limit: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Required | Default     |
    /// |---------------------------|----------|-------------|
    /// | `HOST`                    | no       | `0.0.0.0`   |
    /// | `PORT`                    | no       | `3000`      |
    /// | `CORS_ORIGINS`            | no       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | no       | `60`        |
    /// | `JWT_SECRET`              | **yes**  | --          |
    /// | `INFERENCE_URL`           | **yes**  | --          |
    /// | `INFERENCE_KEY`           | **yes**  | --          |
    /// | `INFERENCE_MODEL_ID`      | **yes**  | --          |
    /// | `AI_REQUEST_TIMEOUT_SECS` | no       | `30`        |
    /// | `DAILY_TOKEN_LIMIT`       | no       | `10000`     |
    ///
    /// # Panics
    ///
    /// Panics when a required variable is missing or a numeric one fails to
    /// parse; misconfiguration should fail at startup, not at first use.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let inference = InferenceConfig {
            base_url: std::env::var("INFERENCE_URL")
                .expect("INFERENCE_URL must be set in the environment"),
            api_key: std::env::var("INFERENCE_KEY")
                .expect("INFERENCE_KEY must be set in the environment"),
            model_id: std::env::var("INFERENCE_MODEL_ID")
                .expect("INFERENCE_MODEL_ID must be set in the environment"),
            request_timeout_secs: std::env::var("AI_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .expect("AI_REQUEST_TIMEOUT_SECS must be a valid u64"),
        };

        let daily_token_limit: i64 = std::env::var("DAILY_TOKEN_LIMIT")
            .unwrap_or_else(|_| DAILY_TOKEN_LIMIT.to_string())
            .parse()
            .expect("DAILY_TOKEN_LIMIT must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            inference,
            daily_token_limit,
        }
    }
}
