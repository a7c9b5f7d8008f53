//! OpenAI-style chat-completions backend for the advice seam.

pub mod chat;
pub mod client;

pub use chat::{
    ApiErrorBody, ApiErrorEnvelope, ChatChoice, ChatCompletionRequest, ChatCompletionResponse,
    ChatMessage, ROLE_USER, first_completion_text,
};
pub use client::{
    AdviceClientConfig, AdviceClientError, ChatAdviceClient, DEFAULT_API_BASE, DEFAULT_MODEL,
    DEFAULT_TIMEOUT_S, ENV_API_BASE, ENV_API_KEY, ENV_MODEL, ENV_TIMEOUT_S, map_client_error,
};
