//! CURATOR Engine - Generation Orchestration
//!
//! The decision core of the service: for a given catalog item and requested
//! content kind, either serve the cached artifact or synthesize a new one
//! through the completion provider, persist description cache fills, record
//! the audit trail, and batch-backfill missing descriptions with per-item
//! failure isolation.

pub mod backfill;
pub mod generator;
pub mod prompt;

pub use backfill::BackfillReport;
pub use generator::{ContentGenerator, GenerateRequest, GeneratedContent};
pub use prompt::{build_system_prompt, build_user_prompt};
