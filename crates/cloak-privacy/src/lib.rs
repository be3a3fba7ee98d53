//! # cloak-privacy
//!
//! PII masking and unmasking engine.
//! Deterministic regex detection for emails, phone numbers, and numeric IDs,
//! followed by an AI-assisted catch-all pass. Placeholders are `<KIND_N>`
//! tokens allocated per session; repeated values reuse their placeholder.

pub mod classifier;
pub mod detector;
pub mod orchestrator;
pub mod patterns;
pub mod unmask;

pub use classifier::{LlmClassifier, PassthroughClassifier};
pub use detector::{DetectedEntry, Detection, PatternDetector};
pub use orchestrator::{MaskOutcome, MaskingOrchestrator};
pub use unmask::{substitute, unmask};
