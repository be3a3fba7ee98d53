use crate::errors::CloakResult;

/// Text-generation capability (LLM). Calls may fail transiently with
/// `ProviderError::RateLimited`.
pub trait ITextGenerator: Send + Sync {
    /// Generate a completion for `prompt` using at most `max_tokens`.
    fn generate(&self, prompt: &str, max_tokens: u32) -> CloakResult<String>;

    /// Provider name for logs and error messages.
    fn name(&self) -> &str;
}
