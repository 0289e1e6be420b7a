//! In-memory store implementations
//!
//! Backing stores for tests and development. Failure injection flags let
//! engine tests exercise the partial-failure policies without a database.

use crate::{AuditLog, CatalogStore};
use async_trait::async_trait;
use curator_core::{CatalogItem, CuratorResult, InteractionRecord, StorageError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

// ============================================================================
// IN-MEMORY CATALOG
// ============================================================================

/// Thread-safe in-memory catalog store.
pub struct InMemoryCatalog {
    items: RwLock<HashMap<i64, CatalogItem>>,
    fail_saves: AtomicBool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Seed the store with items, keyed by their ids.
    pub fn with_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let store = Self::new();
        {
            let mut map = store.items.write().unwrap_or_else(|e| e.into_inner());
            for item in items {
                map.insert(item.id, item);
            }
        }
        store
    }

    /// Make every subsequent `save` fail with `SaveFailed`.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }

    /// Direct snapshot of one item, bypassing the trait (test helper).
    pub fn snapshot(&self, id: i64) -> Option<CatalogItem> {
        self.items
            .read()
            .ok()
            .and_then(|map| map.get(&id).cloned())
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn get(&self, id: i64) -> CuratorResult<Option<CatalogItem>> {
        let map = self.items.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(map.get(&id).cloned())
    }

    async fn save(&self, item: &CatalogItem) -> CuratorResult<()> {
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err(StorageError::SaveFailed {
                id: item.id,
                reason: "simulated save failure".to_string(),
            }
            .into());
        }
        let mut map = self.items.write().map_err(|_| StorageError::LockPoisoned)?;
        map.insert(item.id, item.clone());
        Ok(())
    }

    async fn list_missing_descriptions(&self) -> CuratorResult<Vec<CatalogItem>> {
        let map = self.items.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut missing: Vec<CatalogItem> = map
            .values()
            .filter(|item| !item.has_cached_description())
            .cloned()
            .collect();
        // Deterministic order for callers and tests.
        missing.sort_by_key(|item| item.id);
        Ok(missing)
    }
}

impl std::fmt::Debug for InMemoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCatalog")
            .field("items", &self.len())
            .finish()
    }
}

// ============================================================================
// IN-MEMORY AUDIT LOG
// ============================================================================

/// Thread-safe in-memory audit log.
pub struct InMemoryAuditLog {
    records: RwLock<Vec<InteractionRecord>>,
    fail_appends: AtomicBool,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            fail_appends: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `append` fail with `AppendFailed`.
    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::Relaxed);
    }

    /// All appended records, in order (test helper).
    pub fn records(&self) -> Vec<InteractionRecord> {
        self.records
            .read()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn append(&self, record: &InteractionRecord) -> CuratorResult<()> {
        if self.fail_appends.load(Ordering::Relaxed) {
            return Err(StorageError::AppendFailed {
                reason: "simulated append failure".to_string(),
            }
            .into());
        }
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        records.push(record.clone());
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryAuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAuditLog")
            .field("records", &self.len())
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
