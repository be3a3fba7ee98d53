//! AI-assisted catch-all PII classification.
//!
//! The classifier runs on text the deterministic pass has already masked and
//! is asked to mask whatever private PII remains. Its output is untrusted:
//! it is parsed with a two-stage fallback and validated, and any failure is
//! fatal for the turn.

pub mod adapter;
pub mod parse;
pub mod prompt;

pub use adapter::{LlmClassifier, PassthroughClassifier};
pub use parse::parse_classifier_output;
pub use prompt::build_mask_prompt;
