//! # cloak-core
//!
//! Foundation crate for the Cloak privacy-preserving search assistant.
//! Defines the placeholder contract, the PII mapping types, the provider
//! traits, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod mapping;
pub mod models;
pub mod placeholder;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::CloakConfig;
pub use errors::{CloakError, CloakResult};
pub use mapping::{MaskingState, PiiMapping};
pub use placeholder::{PiiKind, Placeholder, PlaceholderCounters};
