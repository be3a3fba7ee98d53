use serde::{Deserialize, Serialize};

use super::defaults;

/// Retry/backoff policy for calls against the text-generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first call.
    pub max_attempts: u32,
    /// Delay before the first retry (milliseconds).
    pub initial_backoff_ms: u64,
    /// Factor applied to the delay after each retry.
    pub multiplier: u32,
    /// Upper bound on any single delay (milliseconds).
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: defaults::DEFAULT_INITIAL_BACKOFF_MS,
            multiplier: defaults::DEFAULT_BACKOFF_MULTIPLIER,
            max_backoff_ms: defaults::DEFAULT_MAX_BACKOFF_MS,
        }
    }
}
