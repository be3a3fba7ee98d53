use crate::errors::CloakResult;
use crate::models::ClassifierResponse;

/// Catch-all PII detection pass run after deterministic detection.
pub trait IPiiClassifier: Send + Sync {
    /// Mask any remaining PII in `text`. Must fail rather than return text
    /// whose masking could not be verified.
    fn classify(&self, text: &str) -> CloakResult<ClassifierResponse>;
}
