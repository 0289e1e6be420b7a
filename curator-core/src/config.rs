//! Configuration types

use crate::error::{ConfigError, CuratorResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generation parameters for provider calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider model identifier.
    pub model: String,
    /// Sampling temperature for all generations.
    pub temperature: f32,
    /// Token budget for single-shot generation requests.
    pub max_tokens: i32,
    /// Reduced token budget for the three-field populate variant.
    pub populate_max_tokens: i32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            populate_max_tokens: 300,
        }
    }
}

impl GenerationConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> CuratorResult<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "model".to_string(),
            }
            .into());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature".to_string(),
                value: self.temperature.to_string(),
                reason: "must be within [0.0, 2.0]".to_string(),
            }
            .into());
        }
        if self.max_tokens <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_tokens".to_string(),
                value: self.max_tokens.to_string(),
                reason: "must be positive".to_string(),
            }
            .into());
        }
        if self.populate_max_tokens <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "populate_max_tokens".to_string(),
                value: self.populate_max_tokens.to_string(),
                reason: "must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Batch backfill parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BackfillConfig {
    /// Pause between consecutive provider calls, to stay within rate limits.
    pub inter_item_delay: Duration,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            inter_item_delay: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GenerationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_model_rejected() {
        let config = GenerationConfig {
            model: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let config = GenerationConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_token_budgets_rejected() {
        let config = GenerationConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GenerationConfig {
            populate_max_tokens: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_backfill_delay_is_one_second() {
        assert_eq!(
            BackfillConfig::default().inter_item_delay,
            Duration::from_secs(1)
        );
    }
}
