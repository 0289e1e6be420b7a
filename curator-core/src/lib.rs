//! CURATOR Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic and no I/O.

pub mod config;
pub mod content;
pub mod entities;
pub mod error;
pub mod text;

pub use config::{BackfillConfig, GenerationConfig};
pub use content::ContentKind;
pub use entities::{
    new_record_id, CatalogItem, ConversationMessage, InteractionRecord, InteractionType, RecordId,
    Timestamp,
};
pub use error::{ConfigError, CuratorError, CuratorResult, LlmError, StorageError};
pub use text::{truncate_for_audit, AUDIT_TEXT_MAX};
