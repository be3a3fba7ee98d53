//! Shared test doubles for the Cloak workspace.
//!
//! - `ScriptedGenerator`: replays a fixed sequence of replies and failures.
//! - `FakeLlm`: masks a known list of names like a stateless classifier and
//!   answers everything else with a fixed template.
//! - `RecordingSearch`: records every query and returns canned hits.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use cloak_core::errors::{CloakResult, ProviderError, SearchError};
use cloak_core::models::{SearchHit, SearchResults};
use cloak_core::traits::{ISearchProvider, ITextGenerator};

/// One scripted generator outcome.
#[derive(Debug, Clone)]
pub enum Step {
    Reply(String),
    RateLimited,
    Unavailable(String),
    CredentialMissing,
}

/// Generator that replays `Step`s in order. Once the script runs out every
/// call fails with `ServiceUnavailable`.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    steps: Mutex<VecDeque<Step>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl ITextGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str, _max_tokens: u32) -> CloakResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(text)) => Ok(text),
            Some(Step::RateLimited) => Err(ProviderError::RateLimited {
                provider: "scripted".into(),
            }
            .into()),
            Some(Step::Unavailable(reason)) => Err(ProviderError::ServiceUnavailable {
                provider: "scripted".into(),
                reason,
            }
            .into()),
            Some(Step::CredentialMissing) => Err(ProviderError::CredentialMissing {
                provider: "scripted".into(),
                env_var: "SCRIPTED_API_KEY".into(),
            }
            .into()),
            None => Err(ProviderError::ServiceUnavailable {
                provider: "scripted".into(),
                reason: "script exhausted".into(),
            }
            .into()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Build a well-formed classifier reply.
pub fn classifier_reply(masked_text: &str, mapping: &[(&str, &str)]) -> String {
    let mapping: serde_json::Map<String, serde_json::Value> = mapping
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    serde_json::json!({ "masked_text": masked_text, "mapping": mapping }).to_string()
}

/// Stateless fake LLM.
///
/// A prompt containing a `'''`-quoted text is treated as a masking request:
/// each configured name found in the text becomes `<NAME_n>`, numbered from 1
/// on every call (like a model with no memory of earlier turns). Any other
/// prompt gets the configured answer.
#[derive(Debug)]
pub struct FakeLlm {
    names: Vec<String>,
    answer: String,
    mask_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            answer: "No answer configured.".to_string(),
            mask_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answer = answer.to_string();
        self
    }

    pub fn mask_calls(&self) -> usize {
        self.mask_calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn mask(&self, text: &str) -> String {
        let mut masked = text.to_string();
        let mut mapping = Vec::new();
        for name in &self.names {
            if masked.contains(name.as_str()) {
                let token = format!("<NAME_{}>", mapping.len() + 1);
                masked = masked.replace(name.as_str(), &token);
                mapping.push((token, name.clone()));
            }
        }
        let pairs: Vec<(&str, &str)> = mapping
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        classifier_reply(&masked, &pairs)
    }
}

impl ITextGenerator for FakeLlm {
    fn generate(&self, prompt: &str, _max_tokens: u32) -> CloakResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match quoted_text(prompt) {
            Some(text) => {
                self.mask_calls.fetch_add(1, Ordering::SeqCst);
                Ok(self.mask(text))
            }
            None => Ok(self.answer.clone()),
        }
    }

    fn name(&self) -> &str {
        "fake-llm"
    }
}

fn quoted_text(prompt: &str) -> Option<&str> {
    let start = prompt.find("'''")? + 3;
    let end = prompt.rfind("'''")?;
    (start <= end).then(|| &prompt[start..end])
}

/// Search double that records queries.
#[derive(Debug, Default)]
pub struct RecordingSearch {
    hits: Vec<SearchHit>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl RecordingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hit(mut self, title: &str, url: &str, snippet: &str) -> Self {
        self.hits.push(SearchHit {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
        });
        self
    }

    /// Every call fails with `SearchError::Unavailable`.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl ISearchProvider for RecordingSearch {
    fn search(&self, query: &str) -> CloakResult<SearchResults> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(SearchError::Unavailable {
                reason: "HTTP 503".into(),
            }
            .into());
        }
        Ok(SearchResults {
            query: query.to_string(),
            hits: self.hits.clone(),
            raw: None,
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}
