//! Stable error codes for the presentation boundary.

/// Every error enum implements this to expose a structured code string
/// alongside its human-readable message.
pub trait CloakErrorCode {
    /// Returns the error code string (e.g., "RATE_LIMITED").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CLASSIFIER_PARSE_FAILURE: &str = "CLASSIFIER_PARSE_FAILURE";
pub const CLASSIFIER_FIELD_MISSING: &str = "CLASSIFIER_FIELD_MISSING";
pub const CLASSIFIER_LEAK: &str = "CLASSIFIER_LEAK";
pub const RATE_LIMITED: &str = "RATE_LIMITED";
pub const RETRIES_EXHAUSTED: &str = "RETRIES_EXHAUSTED";
pub const CREDENTIAL_MISSING: &str = "CREDENTIAL_MISSING";
pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";
pub const SEARCH_UNAVAILABLE: &str = "SEARCH_UNAVAILABLE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SESSION_POISONED: &str = "SESSION_POISONED";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
