//! CURATOR API Server Entry Point
//!
//! Bootstraps configuration, wires the stores and provider into the
//! generation engine, and starts the Axum HTTP server.

use std::sync::Arc;

use axum::http::StatusCode;
use curator_api::{router, ApiError, ApiResult, AppState, ErrorCode, ServerConfig};
use curator_core::CatalogItem;
use curator_engine::ContentGenerator;
use curator_llm::{CompletionProvider, OpenAiCompletionProvider};
use curator_storage::{CatalogStore, InMemoryAuditLog, InMemoryCatalog};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let catalog = Arc::new(load_catalog().await?);
    let audit = Arc::new(InMemoryAuditLog::new());

    let provider: Option<Arc<dyn CompletionProvider>> = match &config.api_key {
        Some(key) => {
            let provider =
                OpenAiCompletionProvider::new(key.clone(), config.generation.model.clone());
            Some(Arc::new(provider) as Arc<dyn CompletionProvider>)
        }
        None => {
            tracing::warn!(
                "OPENAI_API_KEY not set; serving cached content only, generation requests will fail"
            );
            None
        }
    };

    let generator = ContentGenerator::new(catalog, audit, provider, config.generation.clone());
    let state = AppState::new(generator, config.backfill.clone());

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!(addr = %config.bind_addr, "Starting CURATOR API server");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| startup_failure(format!("failed to bind {}: {}", config.bind_addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| startup_failure(format!("server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Build the catalog store, seeding it from `CURATOR_SEED_FILE` when set.
///
/// The seed file is a JSON array of catalog items in the same camelCase
/// shape the API serves.
async fn load_catalog() -> ApiResult<InMemoryCatalog> {
    let catalog = InMemoryCatalog::new();

    let Ok(path) = std::env::var("CURATOR_SEED_FILE") else {
        return Ok(catalog);
    };

    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| startup_failure(format!("failed to read seed file {}: {}", path, e)))?;
    let items: Vec<CatalogItem> = serde_json::from_str(&raw)
        .map_err(|e| startup_failure(format!("failed to parse seed file {}: {}", path, e)))?;

    let count = items.len();
    for item in &items {
        catalog.save(item).await?;
    }
    tracing::info!(count, path = %path, "seeded catalog");

    Ok(catalog)
}

fn startup_failure(message: String) -> ApiError {
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::InternalError,
        message,
    )
}
