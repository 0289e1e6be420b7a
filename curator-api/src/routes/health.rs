//! Liveness endpoint

/// GET /health/ping
pub async fn ping() -> &'static str {
    "pong"
}
