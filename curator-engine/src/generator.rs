//! Generation orchestrator
//!
//! Per-request state machine: CacheCheck -> [HitRetrieval | MissGenerate]
//! -> Persist? -> AuditLog -> Respond. Audit appends are best-effort on
//! every path; cache-fill persistence failures propagate.

use crate::prompt::{build_system_prompt, build_user_prompt};
use chrono::Utc;
use curator_core::{
    new_record_id, truncate_for_audit, CatalogItem, ContentKind, ConversationMessage,
    CuratorError, CuratorResult, GenerationConfig, InteractionRecord, InteractionType, LlmError,
    StorageError,
};
use curator_llm::{ChatMessage, CompletionProvider};
use curator_storage::{AuditLog, CatalogStore};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

/// One generate-or-retrieve request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub player_id: String,
    pub item_id: i64,
    pub kind: ContentKind,
    pub specific_request: Option<String>,
    /// Only consulted for [`ContentKind::Conversation`].
    pub conversation_history: Vec<ConversationMessage>,
}

impl GenerateRequest {
    /// Plain request with no specific question and no history.
    pub fn new(player_id: impl Into<String>, item_id: i64, kind: ContentKind) -> Self {
        Self {
            player_id: player_id.into(),
            item_id,
            kind,
            specific_request: None,
            conversation_history: Vec::new(),
        }
    }
}

/// The served artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    pub content: String,
    pub kind: ContentKind,
}

// ============================================================================
// CONTENT GENERATOR
// ============================================================================

/// The core decision engine for a single generation request.
///
/// Holds its collaborators behind trait objects; no process-wide state.
/// Two concurrent requests for the same item may both miss the cache and
/// both call the provider - last write wins, which is acceptable because
/// generated content is interchangeable rather than uniquely authoritative.
pub struct ContentGenerator {
    catalog: Arc<dyn CatalogStore>,
    audit: Arc<dyn AuditLog>,
    provider: Option<Arc<dyn CompletionProvider>>,
    config: GenerationConfig,
}

impl ContentGenerator {
    /// Create a new generator. `provider` is `None` when no credential is
    /// configured; generation requests then fail with
    /// `LlmError::ProviderNotConfigured` before any network call.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        audit: Arc<dyn AuditLog>,
        provider: Option<Arc<dyn CompletionProvider>>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            catalog,
            audit,
            provider,
            config,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Whether a completion provider is configured.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub(crate) fn require_provider(&self) -> CuratorResult<&Arc<dyn CompletionProvider>> {
        self.provider
            .as_ref()
            .ok_or(CuratorError::Llm(LlmError::ProviderNotConfigured))
    }

    pub(crate) fn catalog(&self) -> &Arc<dyn CatalogStore> {
        &self.catalog
    }

    /// Serve a generation request: cached description when available,
    /// otherwise a fresh provider completion.
    pub async fn generate(&self, request: GenerateRequest) -> CuratorResult<GeneratedContent> {
        let mut item = self.get_item(request.item_id).await?;

        // Cache check: only the description slot is authoritative cache.
        if request.kind == ContentKind::Description && item.has_cached_description() {
            return self.serve_cached(&request, &item).await;
        }

        let provider = self.require_provider()?;

        let system_prompt = build_system_prompt(&item, request.kind);
        let user_prompt =
            build_user_prompt(&item, request.kind, request.specific_request.as_deref());

        let mut messages = vec![ChatMessage {
            role: "system".to_string(),
            content: system_prompt,
        }];

        // Conversation history goes between the persona and the final user
        // turn. Only user/assistant roles survive; anything else is dropped.
        if request.kind == ContentKind::Conversation {
            messages.extend(
                request
                    .conversation_history
                    .iter()
                    .filter(|m| m.role == "user" || m.role == "assistant")
                    .map(|m| ChatMessage {
                        role: m.role.clone(),
                        content: m.content.clone(),
                    }),
            );
        }

        messages.push(ChatMessage {
            role: "user".to_string(),
            content: user_prompt.clone(),
        });

        let completion = match provider
            .complete(&messages, self.config.max_tokens, self.config.temperature)
            .await
        {
            Ok(completion) => completion,
            Err(err) => {
                // Failed attempts are audited too, so provider outages are
                // visible in the interaction trail.
                self.audit_best_effort(InteractionRecord {
                    id: new_record_id(),
                    player_id: request.player_id.clone(),
                    item_id: request.item_id,
                    interaction_type: InteractionType::LlmGeneration,
                    interaction_data: Some(json!({
                        "contentType": request.kind.as_str(),
                        "specificRequest": request.specific_request,
                    })),
                    was_successful: false,
                    used_llm: true,
                    llm_prompt: Some(truncate_for_audit(&user_prompt)),
                    llm_response: Some(truncate_for_audit(&err.to_string())),
                    llm_tokens: None,
                    timestamp: Utc::now(),
                })
                .await;
                return Err(err);
            }
        };

        // Write-through cache fill for descriptions. Losing this silently
        // would cause repeated redundant provider calls, so failures
        // propagate.
        if request.kind == ContentKind::Description {
            item.generated_description = Some(completion.text.clone());
            item.updated_at = Utc::now();
            self.catalog.save(&item).await?;
            debug!(item_id = item.id, "description cache filled");
        }

        self.audit_best_effort(InteractionRecord {
            id: new_record_id(),
            player_id: request.player_id.clone(),
            item_id: request.item_id,
            interaction_type: InteractionType::LlmGeneration,
            interaction_data: Some(json!({
                "contentType": request.kind.as_str(),
                "specificRequest": request.specific_request,
            })),
            was_successful: true,
            used_llm: true,
            llm_prompt: Some(truncate_for_audit(&user_prompt)),
            llm_response: Some(truncate_for_audit(&completion.text)),
            llm_tokens: completion.total_tokens,
            timestamp: Utc::now(),
        })
        .await;

        Ok(GeneratedContent {
            content: completion.text,
            kind: request.kind,
        })
    }

    /// Populate all three generated slots of one item with a reduced token
    /// budget. Per-slot provider failures are tolerated; the operation only
    /// fails on an unknown item, a missing provider, or a persistence error.
    pub async fn populate_item(&self, item_id: i64) -> CuratorResult<()> {
        let mut item = self.get_item(item_id).await?;
        let provider = self.require_provider()?;

        for kind in [ContentKind::Description, ContentKind::Story, ContentKind::Facts] {
            let messages = [
                ChatMessage::system(build_system_prompt(&item, kind)),
                ChatMessage::user(build_user_prompt(&item, kind, None)),
            ];

            match provider
                .complete(
                    &messages,
                    self.config.populate_max_tokens,
                    self.config.temperature,
                )
                .await
            {
                Ok(completion) => item.set_generated_slot(kind, completion.text),
                Err(err) => {
                    warn!(item_id, kind = %kind, error = %err, "populate: slot generation failed, leaving as-is");
                }
            }
        }

        // One updated_at bump covers all three slots.
        item.updated_at = Utc::now();
        self.catalog.save(&item).await?;
        Ok(())
    }

    async fn serve_cached(
        &self,
        request: &GenerateRequest,
        item: &CatalogItem,
    ) -> CuratorResult<GeneratedContent> {
        let cached = item.generated_description.clone().unwrap_or_default();

        self.audit_best_effort(InteractionRecord {
            id: new_record_id(),
            player_id: request.player_id.clone(),
            item_id: request.item_id,
            interaction_type: InteractionType::DescriptionRetrieval,
            interaction_data: Some(json!({
                "contentType": request.kind.as_str(),
                "source": "Database",
            })),
            was_successful: true,
            used_llm: false,
            llm_prompt: None,
            llm_response: Some(truncate_for_audit(&cached)),
            llm_tokens: None,
            timestamp: Utc::now(),
        })
        .await;

        Ok(GeneratedContent {
            content: cached,
            kind: request.kind,
        })
    }

    async fn get_item(&self, item_id: i64) -> CuratorResult<CatalogItem> {
        self.catalog
            .get(item_id)
            .await?
            .ok_or_else(|| CuratorError::Storage(StorageError::NotFound { id: item_id }))
    }

    /// Append an audit record, swallowing failures. The user-visible
    /// content was already produced; losing the trail entry must not fail
    /// the request.
    pub(crate) async fn audit_best_effort(&self, record: InteractionRecord) {
        if let Err(err) = self.audit.append(&record).await {
            warn!(
                item_id = record.item_id,
                interaction_type = record.interaction_type.as_str(),
                error = %err,
                "failed to append interaction record"
            );
        }
    }
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("provider", &self.provider.is_some())
            .field("config", &self.config)
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use curator_llm::MockCompletionProvider;
    use curator_storage::{InMemoryAuditLog, InMemoryCatalog};

    struct Harness {
        catalog: Arc<InMemoryCatalog>,
        audit: Arc<InMemoryAuditLog>,
        provider: Arc<MockCompletionProvider>,
        generator: ContentGenerator,
    }

    fn harness(items: Vec<CatalogItem>) -> Harness {
        let catalog = Arc::new(InMemoryCatalog::with_items(items));
        let audit = Arc::new(InMemoryAuditLog::new());
        let provider = Arc::new(MockCompletionProvider::new());
        let generator = ContentGenerator::new(
            catalog.clone(),
            audit.clone(),
            Some(provider.clone()),
            GenerationConfig::default(),
        );
        Harness {
            catalog,
            audit,
            provider,
            generator,
        }
    }

    fn item(id: i64) -> CatalogItem {
        let mut item = CatalogItem::new(id, format!("Item {}", id), "Aircraft");
        item.updated_at = Utc::now() - Duration::hours(1);
        item
    }

    fn cached_item(id: i64, cached: &str) -> CatalogItem {
        let mut item = item(id);
        item.generated_description = Some(cached.to_string());
        item
    }

    #[tokio::test]
    async fn test_cache_hit_serves_stored_text_without_provider_call() {
        let h = harness(vec![cached_item(1, "The cached description.")]);
        let before = h.catalog.snapshot(1).unwrap();

        let result = h
            .generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Description))
            .await
            .unwrap();

        assert_eq!(result.content, "The cached description.");
        assert_eq!(h.provider.call_count(), 0);
        // No catalog write on the hit path.
        assert_eq!(h.catalog.snapshot(1).unwrap(), before);

        let records = h.audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].interaction_type,
            InteractionType::DescriptionRetrieval
        );
        assert!(records[0].was_successful);
        assert!(!records[0].used_llm);
        assert!(records[0].llm_prompt.is_none());
        assert_eq!(
            records[0].llm_response.as_deref(),
            Some("The cached description.")
        );
        assert!(records[0].llm_tokens.is_none());
    }

    #[tokio::test]
    async fn test_cache_miss_generates_persists_and_audits() {
        let h = harness(vec![item(1)]);
        h.provider.push_text("Fresh description.");
        let before = h.catalog.snapshot(1).unwrap().updated_at;

        let result = h
            .generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Description))
            .await
            .unwrap();

        assert_eq!(result.content, "Fresh description.");
        assert_eq!(h.provider.call_count(), 1);

        let stored = h.catalog.snapshot(1).unwrap();
        assert_eq!(stored.generated_description.as_deref(), Some("Fresh description."));
        assert!(stored.updated_at > before);

        let records = h.audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].interaction_type, InteractionType::LlmGeneration);
        assert!(records[0].was_successful);
        assert!(records[0].used_llm);
        assert!(records[0].llm_prompt.is_some());
        assert_eq!(records[0].llm_tokens, Some(42));
    }

    #[tokio::test]
    async fn test_story_request_is_never_served_from_description_cache() {
        let h = harness(vec![cached_item(1, "cached")]);
        h.provider.push_text("A story.");

        let result = h
            .generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Story))
            .await
            .unwrap();

        assert_eq!(result.content, "A story.");
        assert_eq!(h.provider.call_count(), 1);
        // Story generations are not persisted to the catalog.
        assert!(h.catalog.snapshot(1).unwrap().generated_story.is_none());
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_found_with_no_audit() {
        let h = harness(vec![]);
        let err = h
            .generator
            .generate(GenerateRequest::new("p1", 99, ContentKind::Description))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Storage(StorageError::NotFound { id: 99 })
        ));
        assert!(h.audit.is_empty());
    }

    #[tokio::test]
    async fn test_missing_provider_fails_without_audit_record() {
        let catalog = Arc::new(InMemoryCatalog::with_items([item(1)]));
        let audit = Arc::new(InMemoryAuditLog::new());
        let generator = ContentGenerator::new(
            catalog,
            audit.clone(),
            None,
            GenerationConfig::default(),
        );

        let err = generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Description))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Llm(LlmError::ProviderNotConfigured)
        ));
        assert!(audit.is_empty());
    }

    #[tokio::test]
    async fn test_missing_provider_still_serves_cache_hits() {
        let catalog = Arc::new(InMemoryCatalog::with_items([cached_item(1, "cached")]));
        let audit = Arc::new(InMemoryAuditLog::new());
        let generator = ContentGenerator::new(
            catalog,
            audit.clone(),
            None,
            GenerationConfig::default(),
        );

        let result = generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Description))
            .await
            .unwrap();
        assert_eq!(result.content, "cached");
        assert_eq!(audit.len(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_audited_and_nothing_persisted() {
        let h = harness(vec![item(1)]);
        h.provider.push_result(Err(CuratorError::Llm(LlmError::RequestFailed {
            provider: "openai".to_string(),
            status: 503,
            message: "overloaded".to_string(),
        })));

        let err = h
            .generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Description))
            .await
            .unwrap_err();
        assert!(matches!(err, CuratorError::Llm(LlmError::RequestFailed { status: 503, .. })));

        assert!(h.catalog.snapshot(1).unwrap().generated_description.is_none());

        let records = h.audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].interaction_type, InteractionType::LlmGeneration);
        assert!(!records[0].was_successful);
        assert!(records[0].used_llm);
        assert!(records[0].llm_tokens.is_none());
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_fail_the_request() {
        let h = harness(vec![item(1)]);
        h.provider.push_text("Fresh description.");
        h.audit.fail_appends(true);

        let result = h
            .generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Description))
            .await
            .unwrap();
        assert_eq!(result.content, "Fresh description.");
        // The cache fill still happened.
        assert!(h.catalog.snapshot(1).unwrap().has_cached_description());
        assert!(h.audit.is_empty());
    }

    #[tokio::test]
    async fn test_cache_fill_persistence_failure_propagates() {
        let h = harness(vec![item(1)]);
        h.provider.push_text("Fresh description.");
        h.catalog.fail_saves(true);

        let err = h
            .generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Description))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Storage(StorageError::SaveFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_conversation_history_filtering_and_order() {
        let h = harness(vec![cached_item(1, "cached")]);
        h.provider.push_text("An answer.");

        let mut request = GenerateRequest::new("p1", 1, ContentKind::Conversation);
        request.specific_request = Some("How fast?".to_string());
        request.conversation_history = vec![
            ConversationMessage { role: "user".to_string(), content: "first".to_string() },
            ConversationMessage { role: "system".to_string(), content: "dropped".to_string() },
            ConversationMessage { role: "assistant".to_string(), content: "second".to_string() },
            ConversationMessage { role: "moderator".to_string(), content: "dropped".to_string() },
        ];

        h.generator.generate(request).await.unwrap();

        let calls = h.provider.calls();
        assert_eq!(calls.len(), 1);
        let roles: Vec<&str> = calls[0].messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(calls[0].messages[1].content, "first");
        assert_eq!(calls[0].messages[2].content, "second");
        // Final user turn answers from the cached summary.
        assert_eq!(
            calls[0].messages[3].content,
            "CONTEXT: cached\n\nUSER QUESTION: How fast?"
        );
    }

    #[tokio::test]
    async fn test_history_ignored_for_non_conversation_kinds() {
        let h = harness(vec![item(1)]);
        h.provider.push_text("facts");

        let mut request = GenerateRequest::new("p1", 1, ContentKind::Facts);
        request.conversation_history = vec![ConversationMessage {
            role: "user".to_string(),
            content: "ignored".to_string(),
        }];

        h.generator.generate(request).await.unwrap();

        let calls = h.provider.calls();
        assert_eq!(calls[0].messages.len(), 2);
    }

    #[tokio::test]
    async fn test_single_shot_uses_full_token_budget() {
        let h = harness(vec![item(1)]);
        h.provider.push_text("text");

        h.generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Description))
            .await
            .unwrap();

        let calls = h.provider.calls();
        assert_eq!(calls[0].max_tokens, 500);
        assert!((calls[0].temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_audit_texts_are_truncated() {
        let h = harness(vec![item(1)]);
        h.provider.push_text("x".repeat(5000));

        h.generator
            .generate(GenerateRequest::new("p1", 1, ContentKind::Description))
            .await
            .unwrap();

        let records = h.audit.records();
        let response = records[0].llm_response.as_deref().unwrap();
        assert_eq!(response.chars().count(), curator_core::AUDIT_TEXT_MAX);
        assert!(response.ends_with("..."));
        // The catalog slot keeps the full text.
        assert_eq!(
            h.catalog.snapshot(1).unwrap().generated_description.unwrap().len(),
            5000
        );
    }

    // ========================================================================
    // POPULATE-ONE-ITEM
    // ========================================================================

    #[tokio::test]
    async fn test_populate_fills_all_three_slots() {
        let h = harness(vec![item(1)]);
        h.provider.push_text("desc");
        h.provider.push_text("story");
        h.provider.push_text("facts");

        h.generator.populate_item(1).await.unwrap();

        let stored = h.catalog.snapshot(1).unwrap();
        assert_eq!(stored.generated_description.as_deref(), Some("desc"));
        assert_eq!(stored.generated_story.as_deref(), Some("story"));
        assert_eq!(stored.generated_facts.as_deref(), Some("facts"));
        assert_eq!(h.provider.call_count(), 3);

        let calls = h.provider.calls();
        assert!(calls.iter().all(|c| c.max_tokens == 300));
    }

    #[tokio::test]
    async fn test_populate_tolerates_single_slot_failure() {
        let h = harness(vec![item(1)]);
        h.provider.push_text("desc");
        h.provider.push_result(Err(CuratorError::Llm(LlmError::RequestFailed {
            provider: "openai".to_string(),
            status: 500,
            message: "boom".to_string(),
        })));
        h.provider.push_text("facts");

        h.generator.populate_item(1).await.unwrap();

        let stored = h.catalog.snapshot(1).unwrap();
        assert_eq!(stored.generated_description.as_deref(), Some("desc"));
        assert!(stored.generated_story.is_none());
        assert_eq!(stored.generated_facts.as_deref(), Some("facts"));
    }

    #[tokio::test]
    async fn test_populate_persistence_failure_propagates() {
        let h = harness(vec![item(1)]);
        h.catalog.fail_saves(true);

        let err = h.generator.populate_item(1).await.unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Storage(StorageError::SaveFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_populate_unknown_item_not_found() {
        let h = harness(vec![]);
        let err = h.generator.populate_item(42).await.unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Storage(StorageError::NotFound { id: 42 })
        ));
    }
}
