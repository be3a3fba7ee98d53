//! # cloak-assistant
//!
//! Turn pipeline of the privacy-preserving search assistant. Each user
//! message is masked against its session, searched and answered using only
//! the masked text, then restored with the turn's mapping.

pub mod engine;
pub mod prompt;

pub use engine::AssistantEngine;
pub use prompt::build_answer_prompt;
