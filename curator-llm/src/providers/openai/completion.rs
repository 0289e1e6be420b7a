//! OpenAI completion provider implementation

use super::client::OpenAiClient;
use super::types::{CompletionRequest, CompletionResponse};
use crate::providers::invalid_response;
use crate::{ChatMessage, Completion, CompletionProvider};
use async_trait::async_trait;
use curator_core::CuratorResult;

/// Completion provider backed by the OpenAI chat-completions API.
pub struct OpenAiCompletionProvider {
    client: OpenAiClient,
    model: String,
}

impl OpenAiCompletionProvider {
    /// Create a new provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `model` - Model name (e.g., "gpt-3.5-turbo", "gpt-4o-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: OpenAiClient::new(api_key, 60),
            model: model.into(),
        }
    }

    /// Override the API base URL (for tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(base_url);
        self
    }

    /// Validate the response shape and pull out the generated text.
    fn extract_completion(response: CompletionResponse) -> CuratorResult<Completion> {
        let total_tokens = response.usage.as_ref().and_then(|u| u.total_tokens);

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| invalid_response("openai", "missing or empty choices array"))?;

        let message = choice
            .message
            .ok_or_else(|| invalid_response("openai", "missing message property"))?;

        let text = message
            .content
            .ok_or_else(|| invalid_response("openai", "missing content property"))?;

        if text.trim().is_empty() {
            return Err(invalid_response("openai", "provider returned empty content"));
        }

        Ok(Completion { text, total_tokens })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: i32,
        temperature: f32,
    ) -> CuratorResult<Completion> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature,
            max_tokens,
        };

        let response: CompletionResponse =
            self.client.request("chat/completions", request).await?;

        Self::extract_completion(response)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for OpenAiCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompletionProvider")
            .field("model", &self.model)
            .finish()
    }
}
