//! Route registration

pub mod content;
pub mod health;

use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/llm/generate-content", post(content::generate_content))
        .route("/api/llm/populate-object", post(content::populate_object))
        .route(
            "/api/llm/populate-all-descriptions",
            post(content::populate_all_descriptions),
        )
        .route("/health/ping", get(health::ping))
        .with_state(state)
}
