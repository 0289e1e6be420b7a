//! Batch backfill job
//!
//! Sequential sweep over every catalog item missing a generated
//! description. Per-item failures land in a counter and never abort the
//! run; a fixed pause between provider calls keeps the job inside the
//! provider's rate limits.

use crate::generator::ContentGenerator;
use crate::prompt::{build_system_prompt, build_user_prompt};
use chrono::Utc;
use curator_core::{BackfillConfig, CatalogItem, ContentKind, CuratorResult};
use curator_llm::{ChatMessage, CompletionProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// Aggregate counters for one backfill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
}

impl ContentGenerator {
    /// Fill in missing descriptions across the whole catalog.
    ///
    /// The candidate selection already guarantees a cache miss for every
    /// item, so the provider is called directly instead of going back
    /// through the per-request cache check.
    pub async fn run_backfill(&self, config: &BackfillConfig) -> CuratorResult<BackfillReport> {
        let provider = self.require_provider()?.clone();

        let candidates = self.catalog().list_missing_descriptions().await?;
        if candidates.is_empty() {
            return Ok(BackfillReport::default());
        }

        info!(count = candidates.len(), "backfill: starting");

        let mut report = BackfillReport::default();

        for item in candidates {
            report.processed += 1;

            match self.backfill_one(&provider, item).await {
                Ok(item_id) => {
                    report.successful += 1;
                    info!(item_id, "backfill: description generated");
                }
                Err((item_id, err)) => {
                    report.failed += 1;
                    warn!(item_id, error = %err, "backfill: item failed, continuing");
                }
            }

            tokio::time::sleep(config.inter_item_delay).await;
        }

        info!(
            processed = report.processed,
            successful = report.successful,
            failed = report.failed,
            "backfill: complete"
        );
        Ok(report)
    }

    async fn backfill_one(
        &self,
        provider: &Arc<dyn CompletionProvider>,
        mut item: CatalogItem,
    ) -> Result<i64, (i64, curator_core::CuratorError)> {
        let item_id = item.id;
        let messages = [
            ChatMessage::system(build_system_prompt(&item, ContentKind::Description)),
            ChatMessage::user(build_user_prompt(&item, ContentKind::Description, None)),
        ];

        let completion = provider
            .complete(
                &messages,
                self.config().max_tokens,
                self.config().temperature,
            )
            .await
            .map_err(|e| (item_id, e))?;

        item.generated_description = Some(completion.text);
        item.updated_at = Utc::now();
        self.catalog()
            .save(&item)
            .await
            .map_err(|e| (item_id, e))?;

        Ok(item_id)
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
