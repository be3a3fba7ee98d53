//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize the Cloak tracing/logging system with defaults.
///
/// Reads the `CLOAK_LOG` environment variable for per-crate log levels.
/// Format: `CLOAK_LOG=cloak_privacy=debug,cloak_providers=warn`
///
/// Falls back to `cloak=info` if `CLOAK_LOG` is not set or is invalid.
///
/// This function is idempotent; only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with_config(&ObservabilityConfig::default());
}

/// Initialize tracing using the configured level and output format.
/// `CLOAK_LOG` still takes precedence over `config.log_level`.
pub fn init_tracing_with_config(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CLOAK_LOG")
            .unwrap_or_else(|_| EnvFilter::new(format!("cloak={}", config.log_level)));

        let registry = tracing_subscriber::registry().with(filter);
        // Logs go to stderr; stdout carries turn reports.
        if config.json_logs {
            let _ = registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .try_init();
        } else {
            let _ = registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_writer(std::io::stderr),
                )
                .try_init();
        }
    });
}
