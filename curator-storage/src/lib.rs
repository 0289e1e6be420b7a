//! CURATOR Storage - Store Traits and In-Memory Implementation
//!
//! Defines the storage abstraction the engine works against. The engine
//! must not assume any particular persistence technology: a database-backed
//! catalog is a drop-in implementation of these traits.

pub mod memory;

pub use memory::{InMemoryAuditLog, InMemoryCatalog};

use async_trait::async_trait;
use curator_core::{CatalogItem, CuratorResult, InteractionRecord};

// ============================================================================
// CATALOG STORE TRAIT
// ============================================================================

/// Key-value store of catalog items, addressed by integer id.
/// Implementations must be thread-safe (Send + Sync) and provide per-row
/// atomic read/write; no cross-row transactions are required.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Point read by id. `Ok(None)` when the id is unknown.
    async fn get(&self, id: i64) -> CuratorResult<Option<CatalogItem>>;

    /// Point write; replaces the stored row. Last write wins.
    async fn save(&self, item: &CatalogItem) -> CuratorResult<()>;

    /// All items whose generated description is empty or absent -
    /// the backfill candidate set.
    async fn list_missing_descriptions(&self) -> CuratorResult<Vec<CatalogItem>>;
}

// ============================================================================
// AUDIT LOG TRAIT
// ============================================================================

/// Append-only sink for interaction records. Never read back by the engine;
/// append failures are recovered by the caller per its partial-failure
/// policy.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, record: &InteractionRecord) -> CuratorResult<()>;
}
