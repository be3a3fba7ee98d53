use super::error_code::{self, CloakErrorCode};

/// Web search provider errors. Never retried by the core.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("no search credential configured: set the {env_var} environment variable")]
    CredentialMissing { env_var: String },
}

impl CloakErrorCode for SearchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => error_code::SEARCH_UNAVAILABLE,
            Self::CredentialMissing { .. } => error_code::CREDENTIAL_MISSING,
        }
    }
}
