//! Shared application state

use curator_core::BackfillConfig;
use curator_engine::ContentGenerator;
use std::sync::Arc;

/// State handed to every route handler.
///
/// Cheap to clone; the generator owns the stores and provider behind
/// `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ContentGenerator>,
    pub backfill: BackfillConfig,
}

impl AppState {
    pub fn new(generator: ContentGenerator, backfill: BackfillConfig) -> Self {
        Self {
            generator: Arc::new(generator),
            backfill,
        }
    }
}
