//! Chat-completions wire types.
//!
//! These structs model the request and response bodies of an OpenAI-style
//! `/chat/completions` endpoint. Only the fields the advice path touches
//! are modeled; unknown response fields are ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Role string for the single prompt message.
pub const ROLE_USER: &str = "user";

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user", "assistant", or "system".
    pub role: String,
    pub content: String,
}

/// Request body for `/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature. Omitted from the payload when unset so the
    /// backend default applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    /// Single-user-message request as the advice path sends it.
    pub fn advice(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: ROLE_USER.to_string(),
                content: prompt.into(),
            }],
            temperature: None,
            max_tokens: None,
        }
    }
}

/// One completion choice in a response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,

    /// "stop", "length", etc. Informational only.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response body for `/chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,

    /// Model the backend actually served.
    #[serde(default)]
    pub model: Option<String>,
}

/// Error body an OpenAI-style backend returns alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub code: Option<String>,
}

/// First non-whitespace completion text in a response, if any.
pub fn first_completion_text(response: &ChatCompletionResponse) -> Option<&str> {
    response
        .choices
        .iter()
        .map(|choice| choice.message.content.as_str())
        .find(|content| !content.trim().is_empty())
}
