//! Error types for the CURATOR API
//!
//! Maps engine errors onto HTTP responses. Provider failures pass the
//! upstream status through, matching what callers of the original service
//! observed; everything is serialized as JSON with `error` and
//! `statusCode` fields.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use curator_core::{ConfigError, CuratorError, LlmError, StorageError};
use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error categories surfaced by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Requested catalog item does not exist.
    ItemNotFound,

    /// Request body failed validation.
    InvalidInput,

    /// No provider credential configured on the server.
    ProviderNotConfigured,

    /// The provider rejected the request (non-2xx upstream).
    ProviderRequestFailed,

    /// The provider rate limit was hit.
    ProviderRateLimited,

    /// The provider returned a success status with an unusable body.
    ProviderInvalidResponse,

    /// Catalog or audit storage failed.
    StorageFailed,

    /// Anything else.
    InternalError,
}

// ============================================================================
// API ERROR
// ============================================================================

/// Structured API error carrying the HTTP status to respond with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON wire shape for error responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub code: ErrorCode,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, message)
    }
}

impl From<CuratorError> for ApiError {
    fn from(err: CuratorError) -> Self {
        let message = err.to_string();
        match err {
            CuratorError::Storage(StorageError::NotFound { .. }) => {
                Self::new(StatusCode::NOT_FOUND, ErrorCode::ItemNotFound, message)
            }
            CuratorError::Storage(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::StorageFailed,
                message,
            ),
            CuratorError::Llm(LlmError::ProviderNotConfigured) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ProviderNotConfigured,
                message,
            ),
            CuratorError::Llm(LlmError::RequestFailed { status, .. }) => Self::new(
                upstream_status(status),
                ErrorCode::ProviderRequestFailed,
                message,
            ),
            CuratorError::Llm(LlmError::RateLimited { .. }) => Self::new(
                StatusCode::TOO_MANY_REQUESTS,
                ErrorCode::ProviderRateLimited,
                message,
            ),
            CuratorError::Llm(LlmError::InvalidResponse { .. }) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ProviderInvalidResponse,
                message,
            ),
            CuratorError::Config(ConfigError::MissingRequired { .. })
            | CuratorError::Config(ConfigError::InvalidValue { .. }) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                message,
            ),
        }
    }
}

/// Pass the provider's HTTP status through when it is a representable
/// error status; transport failures (status 0) become 502.
fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            status_code: self.status.as_u16(),
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
