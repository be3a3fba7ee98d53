use super::error_code::{self, CloakErrorCode};
use super::{ClassifierError, ConfigError, ProviderError, SearchError, SessionError};

/// Result alias used across the workspace.
pub type CloakResult<T> = Result<T, CloakError>;

/// Top-level error. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum CloakError {
    #[error("classification error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("generation error: {0}")]
    Provider(#[from] ProviderError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CloakError {
    /// Whether a retry wrapper may attempt the failed call again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_retryable())
    }

    /// The single message a failed turn reports to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Classifier(e) => format!(
                "Your query could not be safely masked, so nothing was sent to external services ({e})."
            ),
            Self::Provider(ProviderError::CredentialMissing { .. }) => self.to_string(),
            Self::Provider(ProviderError::RetriesExhausted { provider, .. }) => format!(
                "{provider} is rate limiting requests; please try again in a moment."
            ),
            Self::Provider(e) => format!("The language model could not answer: {e}."),
            Self::Search(e) => format!("Web search failed: {e}."),
            Self::Config(e) => format!("Cloak is misconfigured: {e}."),
            Self::Session(e) => format!("Session state is unavailable: {e}."),
            Self::Serialization(e) => format!("Internal serialization failure: {e}."),
        }
    }
}

impl CloakErrorCode for CloakError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Classifier(e) => e.error_code(),
            Self::Provider(e) => e.error_code(),
            Self::Search(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Session(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}
