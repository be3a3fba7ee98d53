use super::error_code::{self, CloakErrorCode};

/// Text-generation provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no credential configured for {provider}: set the {env_var} environment variable")]
    CredentialMissing { provider: String, env_var: String },

    #[error("{provider} is rate limiting requests")]
    RateLimited { provider: String },

    #[error("{provider} unavailable: {reason}")]
    ServiceUnavailable { provider: String, reason: String },

    #[error("{provider} returned an unusable response: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("{provider}: all {attempts} attempts exhausted: {last_error}")]
    RetriesExhausted {
        provider: String,
        attempts: u32,
        last_error: String,
    },
}

impl ProviderError {
    /// Whether the retry wrapper may try the call again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl CloakErrorCode for ProviderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CredentialMissing { .. } => error_code::CREDENTIAL_MISSING,
            Self::RateLimited { .. } => error_code::RATE_LIMITED,
            Self::ServiceUnavailable { .. } | Self::InvalidResponse { .. } => {
                error_code::SERVICE_UNAVAILABLE
            }
            Self::RetriesExhausted { .. } => error_code::RETRIES_EXHAUSTED,
        }
    }
}
