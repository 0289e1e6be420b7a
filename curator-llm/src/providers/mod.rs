//! Completion provider implementations
//!
//! Concrete implementations of the `CompletionProvider` trait. Only the
//! OpenAI chat-completions API is supported today.

pub mod openai;

pub use openai::{OpenAiClient, OpenAiCompletionProvider};

use curator_core::{CuratorError, LlmError};

/// Build a `RequestFailed` error.
pub(crate) fn request_failed(
    provider: &str,
    status: u16,
    message: impl Into<String>,
) -> CuratorError {
    CuratorError::Llm(LlmError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    })
}

/// Build a `RateLimited` error.
pub(crate) fn rate_limited(provider: &str, retry_after_ms: i64) -> CuratorError {
    CuratorError::Llm(LlmError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms,
    })
}

/// Build an `InvalidResponse` error.
pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> CuratorError {
    CuratorError::Llm(LlmError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    })
}
