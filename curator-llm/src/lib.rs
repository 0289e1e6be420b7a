//! CURATOR LLM - Completion Provider Abstraction
//!
//! Provider-agnostic trait for chat-completion generation. The OpenAI
//! implementation lives under `providers::openai`; a scripted mock for
//! tests ships in this crate.

pub mod providers;

pub use providers::openai::{OpenAiClient, OpenAiCompletionProvider};

use async_trait::async_trait;
use curator_core::CuratorResult;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// MESSAGE AND COMPLETION TYPES
// ============================================================================

/// One role-tagged message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Generated text plus the provider's reported token usage, when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub total_tokens: Option<i64>,
}

// ============================================================================
// COMPLETION PROVIDER TRAIT
// ============================================================================

/// Trait for generative-text providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// # Errors
/// * `CuratorError::Llm(LlmError::RequestFailed)` - non-success HTTP status
///   or transport failure
/// * `CuratorError::Llm(LlmError::RateLimited)` - provider rate limit hit
/// * `CuratorError::Llm(LlmError::InvalidResponse)` - success status but the
///   body is missing the expected structure
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for an ordered sequence of messages.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: i32,
        temperature: f32,
    ) -> CuratorResult<Completion>;

    /// Model identifier this provider generates with.
    fn model_id(&self) -> &str;
}

// ============================================================================
// MOCK PROVIDER FOR TESTING
// ============================================================================

/// A recorded call to [`MockCompletionProvider::complete`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: i32,
    pub temperature: f32,
}

/// Mock completion provider for testing.
///
/// Returns scripted results in FIFO order and records every call. When the
/// script runs out it answers with a fixed placeholder completion.
pub struct MockCompletionProvider {
    script: Mutex<VecDeque<CuratorResult<Completion>>>,
    calls: Mutex<Vec<RecordedCall>>,
    call_count: AtomicUsize,
}

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Queue a successful completion.
    pub fn push_text(&self, text: impl Into<String>) {
        self.push_result(Ok(Completion {
            text: text.into(),
            total_tokens: Some(42),
        }));
    }

    /// Queue an arbitrary result.
    pub fn push_result(&self, result: CuratorResult<Completion>) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(result);
    }

    /// Number of `complete` invocations so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: i32,
        temperature: f32,
    ) -> CuratorResult<Completion> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                messages: messages.to_vec(),
                max_tokens,
                temperature,
            });

        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Ok(Completion {
                    text: "mock completion".to_string(),
                    total_tokens: None,
                })
            })
    }

    fn model_id(&self) -> &str {
        "mock"
    }
}

impl std::fmt::Debug for MockCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCompletionProvider")
            .field("call_count", &self.call_count())
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use curator_core::{CuratorError, LlmError};

    #[tokio::test]
    async fn test_mock_returns_scripted_results_in_order() {
        let mock = MockCompletionProvider::new();
        mock.push_text("first");
        mock.push_result(Err(CuratorError::Llm(LlmError::RequestFailed {
            provider: "mock".to_string(),
            status: 500,
            message: "boom".to_string(),
        })));

        let first = mock
            .complete(&[ChatMessage::user("hi")], 100, 0.7)
            .await
            .unwrap();
        assert_eq!(first.text, "first");

        let second = mock.complete(&[ChatMessage::user("hi")], 100, 0.7).await;
        assert!(second.is_err());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_records_call_parameters() {
        let mock = MockCompletionProvider::new();
        let messages = vec![ChatMessage::system("persona"), ChatMessage::user("ask")];
        mock.complete(&messages, 300, 0.7).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages, messages);
        assert_eq!(calls[0].max_tokens, 300);
    }

    #[test]
    fn test_chat_message_constructors() {
        assert_eq!(ChatMessage::system("s").role, "system");
        assert_eq!(ChatMessage::user("u").role, "user");
        assert_eq!(ChatMessage::assistant("a").role, "assistant");
    }
}
