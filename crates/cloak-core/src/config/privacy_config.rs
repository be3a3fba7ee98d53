use serde::{Deserialize, Serialize};

use super::defaults;

/// Masking pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Run the AI-assisted catch-all pass after deterministic detection.
    pub classifier_enabled: bool,
    /// Token budget for the classifier call.
    pub classifier_max_tokens: u32,
    pub detect_emails: bool,
    pub detect_phones: bool,
    /// Runs of 4+ digits.
    pub detect_ids: bool,
    /// Mask "Firstname Lastname" pairs when the classifier reports nothing.
    /// Off by default: it also catches public figures and place names.
    pub name_fallback: bool,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            classifier_enabled: defaults::DEFAULT_CLASSIFIER_ENABLED,
            classifier_max_tokens: defaults::DEFAULT_CLASSIFIER_MAX_TOKENS,
            detect_emails: defaults::DEFAULT_DETECT_EMAILS,
            detect_phones: defaults::DEFAULT_DETECT_PHONES,
            detect_ids: defaults::DEFAULT_DETECT_IDS,
            name_fallback: defaults::DEFAULT_NAME_FALLBACK,
        }
    }
}
