//! Error types for CURATOR operations

use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Catalog item not found: id {id}")]
    NotFound { id: i64 },

    #[error("Save failed for catalog item {id}: {reason}")]
    SaveFailed { id: i64, reason: String },

    #[error("Audit append failed: {reason}")]
    AppendFailed { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Generative-text provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("No completion provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: i64,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all CURATOR errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CuratorError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for CURATOR operations.
pub type CuratorResult<T> = Result<T, CuratorError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_not_found() {
        let err = StorageError::NotFound { id: 42 };
        let msg = format!("{}", err);
        assert!(msg.contains("not found"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn test_llm_error_display_request_failed() {
        let err = LlmError::RequestFailed {
            provider: "openai".to_string(),
            status: 503,
            message: "overloaded".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("openai"));
        assert!(msg.contains("503"));
        assert!(msg.contains("overloaded"));
    }

    #[test]
    fn test_llm_error_display_rate_limited() {
        let err = LlmError::RateLimited {
            provider: "openai".to_string(),
            retry_after_ms: 1500,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Rate limited"));
        assert!(msg.contains("1500"));
    }

    #[test]
    fn test_config_error_display_missing_required() {
        let err = ConfigError::MissingRequired {
            field: "api_key".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("api_key"));
    }

    #[test]
    fn test_curator_error_from_variants() {
        let storage = CuratorError::from(StorageError::LockPoisoned);
        assert!(matches!(storage, CuratorError::Storage(_)));

        let llm = CuratorError::from(LlmError::ProviderNotConfigured);
        assert!(matches!(llm, CuratorError::Llm(_)));

        let config = CuratorError::from(ConfigError::MissingRequired {
            field: "model".to_string(),
        });
        assert!(matches!(config, CuratorError::Config(_)));
    }
}
