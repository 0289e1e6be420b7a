//! Server configuration
//!
//! All settings come from the environment. The provider credential is
//! optional: without one the server still starts and serves cached
//! descriptions, but any request needing a fresh generation fails.

use curator_core::{BackfillConfig, ConfigError, CuratorResult, GenerationConfig};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration for the CURATOR server.
#[derive(Clone)]
pub struct ServerConfig {
    /// Socket address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Provider API key, if configured.
    pub api_key: Option<String>,
    /// Generation parameters for provider calls.
    pub generation: GenerationConfig,
    /// Backfill pacing.
    pub backfill: BackfillConfig,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// Recognized variables:
    /// - `OPENAI_API_KEY` - provider credential (optional)
    /// - `CURATOR_BIND_ADDR` - listen address (default `0.0.0.0:8080`)
    /// - `CURATOR_MODEL` - model identifier (default `gpt-3.5-turbo`)
    /// - `CURATOR_BACKFILL_DELAY_MS` - pause between backfill items
    ///   (default `1000`)
    pub fn from_env() -> CuratorResult<Self> {
        let bind_addr = env::var("CURATOR_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| ConfigError::InvalidValue {
            field: "CURATOR_BIND_ADDR".to_string(),
            value: bind_addr.clone(),
            reason: "not a valid socket address".to_string(),
        })?;

        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let mut generation = GenerationConfig::default();
        if let Ok(model) = env::var("CURATOR_MODEL") {
            if !model.trim().is_empty() {
                generation.model = model;
            }
        }
        generation.validate()?;

        let mut backfill = BackfillConfig::default();
        if let Ok(raw) = env::var("CURATOR_BACKFILL_DELAY_MS") {
            let millis: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "CURATOR_BACKFILL_DELAY_MS".to_string(),
                value: raw.clone(),
                reason: "not a non-negative integer".to_string(),
            })?;
            backfill.inter_item_delay = Duration::from_millis(millis);
        }

        Ok(Self {
            bind_addr,
            api_key,
            generation,
            backfill,
        })
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("generation", &self.generation)
            .field("backfill", &self.backfill)
            .finish()
    }
}
