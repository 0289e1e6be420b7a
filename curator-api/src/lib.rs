//! CURATOR API - REST API Layer
//!
//! Exposes the generation engine over HTTP: generate-or-retrieve content
//! for one catalog item, populate all three generated slots of one item,
//! and run the catalog-wide description backfill.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;
pub use state::AppState;
