//! Top-level Cloak configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    GenerationConfig, ObservabilityConfig, PrivacyConfig, RetryConfig, SearchConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CLOAK_*`)
/// 2. Config file (`cloak.toml` or an explicit path)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CloakConfig {
    pub privacy: PrivacyConfig,
    pub generation: GenerationConfig,
    pub search: SearchConfig,
    pub retry: RetryConfig,
    pub observability: ObservabilityConfig,
}

impl CloakConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `path` must exist. Without one, `cloak.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(super::defaults::DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Unknown keys are ignored.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "retry.max_attempts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.retry.multiplier == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "retry.multiplier".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.search.max_results == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "search.max_results".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ConfigError::ValidationFailed {
                field: "generation.temperature".to_string(),
                message: "must be between 0.0 and 2.0".to_string(),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `CLOAK_GENERATION_MODEL`, `CLOAK_RETRY_MAX_ATTEMPTS`, etc.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Values that fail to
    /// parse are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("CLOAK_PRIVACY_CLASSIFIER_ENABLED").and_then(|v| v.parse().ok()) {
            self.privacy.classifier_enabled = v;
        }
        if let Some(v) = lookup("CLOAK_PRIVACY_NAME_FALLBACK").and_then(|v| v.parse().ok()) {
            self.privacy.name_fallback = v;
        }
        if let Some(v) = lookup("CLOAK_GENERATION_ENDPOINT") {
            self.generation.endpoint = v;
        }
        if let Some(v) = lookup("CLOAK_GENERATION_MODEL") {
            self.generation.model = v;
        }
        if let Some(v) = lookup("CLOAK_GENERATION_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.generation.max_tokens = v;
        }
        if let Some(v) = lookup("CLOAK_SEARCH_ENDPOINT") {
            self.search.endpoint = v;
        }
        if let Some(v) = lookup("CLOAK_SEARCH_MAX_RESULTS").and_then(|v| v.parse().ok()) {
            self.search.max_results = v;
        }
        if let Some(v) = lookup("CLOAK_RETRY_MAX_ATTEMPTS").and_then(|v| v.parse().ok()) {
            self.retry.max_attempts = v;
        }
        if let Some(v) = lookup("CLOAK_RETRY_INITIAL_BACKOFF_MS").and_then(|v| v.parse().ok()) {
            self.retry.initial_backoff_ms = v;
        }
        if let Some(v) = lookup("CLOAK_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = lookup("CLOAK_JSON_LOGS").and_then(|v| v.parse().ok()) {
            self.observability.json_logs = v;
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
