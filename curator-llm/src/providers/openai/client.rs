//! OpenAI HTTP client with request spacing

use super::types::ApiError;
use crate::providers::{invalid_response, rate_limited, request_failed};
use curator_core::CuratorResult;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const PROVIDER: &str = "openai";

/// Default end-to-end timeout for one provider request. An exhausted
/// timeout surfaces as a `RequestFailed` with status 0.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI API client.
///
/// Enforces a minimum interval between consecutive requests derived from
/// the requests-per-minute budget, so interactive and batch callers stay
/// within the provider's rate limits.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    last_request: Arc<AtomicU64>,
    min_request_interval_ms: u64,
    start_time: Instant,
}

impl OpenAiClient {
    /// Create a new OpenAI client.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `requests_per_minute` - Maximum requests per minute (default: 60)
    pub fn new(api_key: impl Into<String>, requests_per_minute: u32) -> Self {
        let rpm = requests_per_minute.max(1);
        let min_interval_ms = (60_000 / rpm as u64).max(10);

        Self {
            client: Client::builder()
                .timeout(DEFAULT_REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            last_request: Arc::new(AtomicU64::new(0)),
            min_request_interval_ms: min_interval_ms,
            start_time: Instant::now(),
        }
    }

    /// Override the API base URL (for tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Make an API request with automatic request spacing.
    pub async fn request<Req: Serialize, Res: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Req,
    ) -> CuratorResult<Res> {
        // Enforce minimum interval between requests
        let now_ms = self.start_time.elapsed().as_millis() as u64;
        let last_ms = self.last_request.load(Ordering::Relaxed);
        let elapsed = now_ms.saturating_sub(last_ms);

        if elapsed < self.min_request_interval_ms {
            let wait_ms = self.min_request_interval_ms - elapsed;
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;
        }

        self.last_request.store(now_ms, Ordering::Relaxed);

        // Make HTTP request
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| request_failed(PROVIDER, 0, format!("HTTP request failed: {}", e)))?;

        // Handle response
        let status = response.status();
        let retry_after_ms = parse_retry_after_ms(response.headers()).unwrap_or(0);

        if status.is_success() {
            response.json().await.map_err(|e| {
                invalid_response(PROVIDER, format!("Failed to parse response: {}", e))
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            let error_msg = extract_error_message(status, &error_text);

            Err(match status {
                StatusCode::TOO_MANY_REQUESTS => rate_limited(PROVIDER, retry_after_ms),
                _ => request_failed(PROVIDER, status.as_u16(), error_msg),
            })
        }
    }
}

/// Best-effort extraction of a human-readable message from a provider
/// error body: structured `error.message` wins, then `error.type` prefixed
/// onto the raw body, then the raw body, then a status-derived fallback.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
        if let Some(message) = api_error.error.message {
            return message;
        }
        if let Some(error_type) = api_error.error.r#type {
            return format!("{}: {}", error_type, body);
        }
    }

    if body.trim().is_empty() {
        format!("OpenAI API request failed with status {}", status)
    } else {
        body.to_string()
    }
}

fn parse_retry_after_ms(headers: &reqwest::header::HeaderMap) -> Option<i64> {
    headers
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<f64>().ok())
        .map(|seconds| (seconds * 1000.0) as i64)
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
