//! Blocking advice client for OpenAI-style chat-completion backends.
//!
//! Credentials come from the environment; there is no baked-in key and no
//! anonymous mode. A missing key surfaces as an error at construction,
//! which the caller turns into the advice fallback rather than a failed
//! assessment.

use std::time::Duration;

use thiserror::Error;
use vitals_core::advice::{AdviceError, AdviceGenerator};

use super::chat::{ApiErrorEnvelope, ChatCompletionRequest, ChatCompletionResponse, first_completion_text};

/// Environment variable holding the bearer API key. Required.
pub const ENV_API_KEY: &str = "VITALS_ADVICE_API_KEY";

/// Environment variable overriding the API base URL.
pub const ENV_API_BASE: &str = "VITALS_ADVICE_API_BASE";

/// Environment variable overriding the model name.
pub const ENV_MODEL: &str = "VITALS_ADVICE_MODEL";

/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT_S: &str = "VITALS_ADVICE_TIMEOUT_S";

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TIMEOUT_S: u64 = 30;

/// How many error-body bytes to keep when the backend's error payload is
/// not the documented JSON envelope.
const ERROR_BODY_SNIPPET_LEN: usize = 200;

/// Errors from the advice client and its configuration.
#[derive(Debug, Error)]
pub enum AdviceClientError {
    #[error("advice API key missing (set VITALS_ADVICE_API_KEY)")]
    MissingApiKey,

    #[error("invalid advice client config: {0}")]
    InvalidConfig(String),

    #[error("http transport failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("advice API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("advice API response contained no completion text")]
    EmptyCompletion,
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct AdviceClientConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl AdviceClientConfig {
    /// Resolve explicit values over defaults, failing closed on a missing
    /// or empty API key.
    pub fn resolve(
        api_key: Option<String>,
        api_base: Option<String>,
        model: Option<String>,
        timeout_s: Option<u64>,
    ) -> Result<Self, AdviceClientError> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(AdviceClientError::MissingApiKey),
        };
        let api_base = match api_base {
            Some(base) if !base.trim().is_empty() => base,
            Some(_) => {
                return Err(AdviceClientError::InvalidConfig(
                    "api base is empty".to_string(),
                ));
            }
            None => DEFAULT_API_BASE.to_string(),
        };
        let timeout_s = timeout_s.unwrap_or(DEFAULT_TIMEOUT_S);
        if timeout_s == 0 {
            return Err(AdviceClientError::InvalidConfig(
                "timeout must be a positive number of seconds".to_string(),
            ));
        }
        Ok(Self {
            api_base,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_s),
        })
    }

    /// Resolve from `VITALS_ADVICE_*` environment variables.
    pub fn from_env() -> Result<Self, AdviceClientError> {
        let timeout_s = match std::env::var(ENV_TIMEOUT_S) {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|_| {
                AdviceClientError::InvalidConfig(format!(
                    "{ENV_TIMEOUT_S} must be an integer number of seconds"
                ))
            })?),
            Err(_) => None,
        };
        Self::resolve(
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_API_BASE).ok(),
            std::env::var(ENV_MODEL).ok(),
            timeout_s,
        )
    }
}

/// Blocking chat-completions client implementing the advice seam.
#[derive(Debug)]
pub struct ChatAdviceClient {
    http: reqwest::blocking::Client,
    config: AdviceClientConfig,
}

impl ChatAdviceClient {
    pub fn new(config: AdviceClientConfig) -> Result<Self, AdviceClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, AdviceClientError> {
        Self::new(AdviceClientConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn complete(&self, prompt: &str) -> Result<String, AdviceClientError> {
        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let request = ChatCompletionRequest::advice(self.config.model.clone(), prompt);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AdviceClientError::Api {
                status: status.as_u16(),
                message: extract_api_error_message(&body),
            });
        }

        let parsed: ChatCompletionResponse = response.json()?;
        match first_completion_text(&parsed) {
            Some(text) => Ok(text.to_string()),
            None => Err(AdviceClientError::EmptyCompletion),
        }
    }
}

impl AdviceGenerator for ChatAdviceClient {
    fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
        self.complete(prompt).map_err(map_client_error)
    }
}

/// Prefer the structured envelope message; fall back to a body snippet.
fn extract_api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty error body".to_string()
            } else {
                trimmed.chars().take(ERROR_BODY_SNIPPET_LEN).collect()
            }
        }
    }
}

/// Map client errors onto the advice failure taxonomy.
pub fn map_client_error(err: AdviceClientError) -> AdviceError {
    match err {
        AdviceClientError::Http(http_err) => AdviceError::network(http_err.to_string()),
        AdviceClientError::Api { status, message } if status == 401 || status == 403 => {
            AdviceError::auth(format!("status {status}: {message}"))
        }
        AdviceClientError::Api { status, message } => {
            AdviceError::api(format!("status {status}: {message}"))
        }
        AdviceClientError::EmptyCompletion => {
            AdviceError::invalid_response("completion carried no advice text")
        }
        AdviceClientError::MissingApiKey | AdviceClientError::InvalidConfig(_) => {
            AdviceError::auth(err.to_string())
        }
    }
}
