use std::sync::Arc;

use cloak_core::errors::CloakResult;
use cloak_core::models::ClassifierResponse;
use cloak_core::traits::{IPiiClassifier, ITextGenerator};
use tracing::{debug, warn};

use super::{build_mask_prompt, parse_classifier_output};

/// Classifier backed by a text-generation provider.
///
/// Retrying rate-limited calls is the generator's concern; wrap it in a
/// retrying decorator before handing it here.
pub struct LlmClassifier {
    generator: Arc<dyn ITextGenerator>,
    max_tokens: u32,
}

impl LlmClassifier {
    pub fn new(generator: Arc<dyn ITextGenerator>, max_tokens: u32) -> Self {
        Self {
            generator,
            max_tokens,
        }
    }
}

impl IPiiClassifier for LlmClassifier {
    fn classify(&self, text: &str) -> CloakResult<ClassifierResponse> {
        if text.trim().is_empty() {
            return Ok(ClassifierResponse::unchanged(text));
        }

        let _span = cloak_core::classify_span!(self.generator.name()).entered();
        let prompt = build_mask_prompt(text);
        let raw = self.generator.generate(&prompt, self.max_tokens)?;

        let response = parse_classifier_output(&raw).map_err(|e| {
            warn!(error = %e, raw_len = raw.len(), "classifier output rejected");
            e
        })?;
        debug!(entries = response.mapping.len(), "classifier pass complete");
        Ok(response)
    }
}

/// Classifier that masks nothing. Used when the AI pass is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughClassifier;

impl IPiiClassifier for PassthroughClassifier {
    fn classify(&self, text: &str) -> CloakResult<ClassifierResponse> {
        Ok(ClassifierResponse::unchanged(text))
    }
}
