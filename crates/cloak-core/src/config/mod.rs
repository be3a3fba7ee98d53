//! Configuration system for Cloak.
//! TOML-based, 3-layer resolution: env > file > compiled defaults.

pub mod cloak_config;
pub mod defaults;
pub mod generation_config;
pub mod observability_config;
pub mod privacy_config;
pub mod retry_config;
pub mod search_config;

pub use cloak_config::CloakConfig;
pub use generation_config::GenerationConfig;
pub use observability_config::ObservabilityConfig;
pub use privacy_config::PrivacyConfig;
pub use retry_config::RetryConfig;
pub use search_config::SearchConfig;
