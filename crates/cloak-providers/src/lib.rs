//! # cloak-providers
//!
//! Blocking HTTP clients for the text-generation and web-search services,
//! plus the retry policy applied to generation calls.

pub mod openai;
pub mod retry;
pub mod search;

pub use openai::OpenAiGenerator;
pub use retry::{RetryPolicy, RetryingGenerator};
pub use search::HttpSearchProvider;
