//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use cloak_core::config::GenerationConfig;
use cloak_core::errors::{CloakResult, ProviderError};
use cloak_core::traits::ITextGenerator;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PROVIDER: &str = "openai";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking client for `POST {endpoint}/chat/completions`.
///
/// A single attempt per call; wrap in `RetryingGenerator` for backoff on
/// rate limiting.
pub struct OpenAiGenerator {
    client: reqwest::blocking::Client,
    url: String,
    model: String,
    temperature: f64,
    api_key: Option<String>,
    api_key_env: String,
}

impl std::fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl OpenAiGenerator {
    /// Build from config, reading the key from `config.api_key_env`.
    pub fn from_config(config: &GenerationConfig) -> CloakResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: &GenerationConfig, api_key: Option<String>) -> CloakResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::ServiceUnavailable {
                provider: PROVIDER.to_string(),
                reason: format!("http client: {e}"),
            })?;

        Ok(Self {
            client,
            url: completions_url(&config.endpoint),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key,
            api_key_env: config.api_key_env.clone(),
        })
    }
}

impl ITextGenerator for OpenAiGenerator {
    fn generate(&self, prompt: &str, max_tokens: u32) -> CloakResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::CredentialMissing {
                provider: PROVIDER.to_string(),
                env_var: self.api_key_env.clone(),
            }
            .into());
        };

        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature: self.temperature,
        };

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|e| ProviderError::ServiceUnavailable {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(status_error(status.as_u16(), &body).into());
        }

        let body: ChatResponse = resp.json().map_err(|e| ProviderError::InvalidResponse {
            provider: PROVIDER.to_string(),
            reason: format!("deserialization failed: {e}"),
        })?;
        let content = first_content(body)?;
        debug!(prompt_len = prompt.len(), completion_len = content.len(), "completion received");
        Ok(content)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

fn completions_url(endpoint: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else {
        format!("{base}/chat/completions")
    }
}

/// Map a non-success HTTP status to a provider error.
fn status_error(status: u16, body: &str) -> ProviderError {
    if status == 429 {
        return ProviderError::RateLimited {
            provider: PROVIDER.to_string(),
        };
    }
    let snippet: String = body.chars().take(200).collect();
    ProviderError::ServiceUnavailable {
        provider: PROVIDER.to_string(),
        reason: format!("HTTP {status}: {snippet}"),
    }
}

fn first_content(body: ChatResponse) -> Result<String, ProviderError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| ProviderError::InvalidResponse {
            provider: PROVIDER.to_string(),
            reason: "no completion content".to_string(),
        })
}
