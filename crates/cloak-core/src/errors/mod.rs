//! Error handling for Cloak.
//! One error enum per subsystem, `thiserror` only, aggregated into `CloakError`.

pub mod classifier_error;
pub mod cloak_error;
pub mod config_error;
pub mod error_code;
pub mod provider_error;
pub mod search_error;
pub mod session_error;

pub use classifier_error::ClassifierError;
pub use cloak_error::{CloakError, CloakResult};
pub use config_error::ConfigError;
pub use error_code::CloakErrorCode;
pub use provider_error::ProviderError;
pub use search_error::SearchError;
pub use session_error::SessionError;
