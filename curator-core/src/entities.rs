//! Catalog and audit entity types

use crate::content::ContentKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Audit record identifier using UUIDv7 for timestamp-sortable IDs.
pub type RecordId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 RecordId (timestamp-sortable).
pub fn new_record_id() -> RecordId {
    Uuid::now_v7()
}

// ============================================================================
// CATALOG ITEM
// ============================================================================

/// A browsable catalog item with three independently nullable
/// generated-content slots.
///
/// A non-empty `generated_description` is authoritative cache content for
/// [`ContentKind::Description`]: it is never invalidated automatically and
/// only an explicit regeneration overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Immutable integer identity, assigned by the catalog store.
    pub id: i64,
    pub name: String,
    /// Object type, e.g. "Aircraft" or "Engine". Required like `name`.
    pub kind: String,
    pub category: Option<String>,
    pub era: Option<String>,
    pub manufacturer: Option<String>,
    /// Curator-authored free-text description (distinct from the generated one).
    pub description: Option<String>,
    pub generated_description: Option<String>,
    pub generated_story: Option<String>,
    pub generated_facts: Option<String>,
    /// Bumped by the engine on every successful write to a generated slot.
    pub updated_at: Timestamp,
}

impl CatalogItem {
    /// Create a bare item with only the required fields set.
    pub fn new(id: i64, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            category: None,
            era: None,
            manufacturer: None,
            description: None,
            generated_description: None,
            generated_story: None,
            generated_facts: None,
            updated_at: Utc::now(),
        }
    }

    /// Whether the description slot holds usable cache content.
    /// Whitespace-only values count as empty.
    pub fn has_cached_description(&self) -> bool {
        self.generated_description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    /// Read access to a generated slot by content kind.
    /// `Conversation` and `Other` have no slot of their own.
    pub fn generated_slot(&self, kind: ContentKind) -> Option<&str> {
        match kind {
            ContentKind::Description => self.generated_description.as_deref(),
            ContentKind::Story => self.generated_story.as_deref(),
            ContentKind::Facts => self.generated_facts.as_deref(),
            ContentKind::Conversation | ContentKind::Other => None,
        }
    }

    /// Write a generated slot by content kind. No-op for kinds without a slot.
    pub fn set_generated_slot(&mut self, kind: ContentKind, value: String) {
        match kind {
            ContentKind::Description => self.generated_description = Some(value),
            ContentKind::Story => self.generated_story = Some(value),
            ContentKind::Facts => self.generated_facts = Some(value),
            ContentKind::Conversation | ContentKind::Other => {}
        }
    }
}

// ============================================================================
// INTERACTION RECORD
// ============================================================================

/// Interaction type tag for audit records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionType {
    /// Cached description served without a provider call.
    DescriptionRetrieval,
    /// Content synthesized through the generative-text provider.
    LlmGeneration,
    /// Anything else the wider system records (clicks, video views, ...).
    Other(String),
}

impl InteractionType {
    /// Stable string tag as stored by the audit log.
    pub fn as_str(&self) -> &str {
        match self {
            InteractionType::DescriptionRetrieval => "Description_Retrieval",
            InteractionType::LlmGeneration => "LLM_Generation",
            InteractionType::Other(tag) => tag,
        }
    }
}

/// One append-only audit entry capturing a content retrieval or generation
/// event. Created once per request/attempt, never updated or deleted.
///
/// `llm_prompt` and `llm_response` must already be truncated with
/// [`crate::text::truncate_for_audit`] before construction; the store
/// persists them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub id: RecordId,
    pub player_id: String,
    pub item_id: i64,
    pub interaction_type: InteractionType,
    /// Opaque JSON payload describing the interaction.
    pub interaction_data: Option<serde_json::Value>,
    pub was_successful: bool,
    pub used_llm: bool,
    pub llm_prompt: Option<String>,
    pub llm_response: Option<String>,
    pub llm_tokens: Option<i64>,
    pub timestamp: Timestamp,
}

// ============================================================================
// CONVERSATION MESSAGE
// ============================================================================

/// Transient conversation-history message. Not persisted; only used to
/// extend the prompt for [`ContentKind::Conversation`] requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// "user" or "assistant"; anything else is silently dropped by the engine.
    pub role: String,
    pub content: String,
}
