//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;

use senae_core::order::DEFAULT_ORDER_PREFIX;

/// Log levels accepted by `SENAE_LOG_LEVEL`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenaeConfig {
    /// Default tracing level (`RUST_LOG` still wins when set)
    pub log_level: String,

    /// Pretty-print JSON output
    pub pretty_json: bool,

    /// Prefix of generated order numbers
    pub order_prefix: String,
}

impl Default for SenaeConfig {
    fn default() -> Self {
        SenaeConfig {
            log_level: "info".to_string(),
            pretty_json: true,
            order_prefix: DEFAULT_ORDER_PREFIX.to_string(),
        }
    }
}

impl SenaeConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. `load` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SenaeConfig::default();

        let config = SenaeConfig {
            log_level: lookup("SENAE_LOG_LEVEL")
                .map(|level| level.trim().to_lowercase())
                .unwrap_or(defaults.log_level),

            pretty_json: match lookup("SENAE_PRETTY_JSON") {
                Some(raw) => parse_bool(&raw)
                    .ok_or_else(|| ConfigError::InvalidValue("SENAE_PRETTY_JSON".to_string()))?,
                None => defaults.pretty_json,
            },

            order_prefix: lookup("SENAE_ORDER_PREFIX")
                .map(|prefix| prefix.trim().to_string())
                .unwrap_or(defaults.order_prefix),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks values that parsed but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidValue("SENAE_LOG_LEVEL".to_string()));
        }

        let prefix_ok = (2..=8).contains(&self.order_prefix.len())
            && self.order_prefix.chars().all(|c| c.is_ascii_uppercase());
        if !prefix_ok {
            return Err(ConfigError::InvalidOrderPrefix(self.order_prefix.clone()));
        }

        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Order prefix must be 2 to 8 upper-case ASCII letters, got {0:?}")]
    InvalidOrderPrefix(String),
}
