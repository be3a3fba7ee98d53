use super::error_code::{self, CloakErrorCode};

/// Failures of the AI-assisted classification pass.
///
/// Every variant is fatal for the turn: text that could not be verified as
/// masked is never forwarded to an external service.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Neither the raw response nor the extracted `{...}` block parsed as JSON.
    /// The raw output is not embedded here because it may carry unmasked PII.
    #[error("classifier output is not valid JSON ({raw_len} bytes): {reason}")]
    ParseFailure { reason: String, raw_len: usize },

    #[error("classifier output is missing required field `{field}`")]
    FieldMissing { field: String },

    #[error("classifier mapping key `{token}` is not a <KIND_N> placeholder")]
    InvalidPlaceholder { token: String },

    /// The classifier's masked text re-introduced a value that the
    /// deterministic pass had already replaced.
    #[error("classifier output still contains the value masked as {placeholder}")]
    LeakedValue { placeholder: String },
}

impl CloakErrorCode for ClassifierError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ParseFailure { .. } | Self::InvalidPlaceholder { .. } => {
                error_code::CLASSIFIER_PARSE_FAILURE
            }
            Self::FieldMissing { .. } => error_code::CLASSIFIER_FIELD_MISSING,
            Self::LeakedValue { .. } => error_code::CLASSIFIER_LEAK,
        }
    }
}
