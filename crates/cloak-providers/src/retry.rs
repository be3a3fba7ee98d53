//! Retry with exponential, capped backoff.
//!
//! Only errors reporting `is_retryable()` (rate limiting) are retried; every
//! other failure is returned from the first attempt unchanged.

use std::sync::Arc;
use std::time::Duration;

use cloak_core::config::RetryConfig;
use cloak_core::errors::{CloakResult, ProviderError};
use cloak_core::traits::ITextGenerator;
use tracing::{debug, warn};

/// How often and how patiently to retry a rate-limited call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first call.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub multiplier: u32,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            multiplier: config.multiplier.max(1),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
        }
    }

    /// A single attempt, never retried.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            multiplier: 1,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based).
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let mut delay = self.initial_backoff;
        for _ in 1..retry {
            delay = delay.saturating_mul(self.multiplier);
            if delay >= self.max_backoff {
                break;
            }
        }
        delay.min(self.max_backoff)
    }

    /// Run `f` until it succeeds, fails with a non-retryable error, or the
    /// attempts run out. `op` names the operation in logs and errors.
    pub fn run<T>(&self, op: &str, mut f: impl FnMut() -> CloakResult<T>) -> CloakResult<T> {
        let mut attempt = 1;
        loop {
            match f() {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= self.max_attempts => {
                    warn!(op, attempts = attempt, error = %e, "retries exhausted");
                    return Err(ProviderError::RetriesExhausted {
                        provider: op.to_string(),
                        attempts: attempt,
                        last_error: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    let delay = self.backoff_for(attempt);
                    debug!(
                        op,
                        attempt,
                        max_attempts = self.max_attempts,
                        ?delay,
                        error = %e,
                        "retrying after backoff"
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Text generator decorator applying a `RetryPolicy` to every call.
pub struct RetryingGenerator {
    inner: Arc<dyn ITextGenerator>,
    policy: RetryPolicy,
}

impl RetryingGenerator {
    pub fn new(inner: Arc<dyn ITextGenerator>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl ITextGenerator for RetryingGenerator {
    fn generate(&self, prompt: &str, max_tokens: u32) -> CloakResult<String> {
        let _span = cloak_core::generate_span!(self.inner.name(), max_tokens).entered();
        self.policy
            .run(self.inner.name(), || self.inner.generate(prompt, max_tokens))
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
