use serde::{Deserialize, Serialize};

use crate::mapping::PiiMapping;

/// Validated output of the AI-assisted detection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierResponse {
    pub masked_text: String,
    /// Placeholder → original for every span the classifier reports.
    pub mapping: PiiMapping,
}

impl ClassifierResponse {
    /// A response that masks nothing.
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            masked_text: text.into(),
            mapping: PiiMapping::new(),
        }
    }
}
