//! SerpAPI-style web search over blocking HTTP.

use std::time::Duration;

use cloak_core::config::SearchConfig;
use cloak_core::errors::{CloakResult, SearchError};
use cloak_core::models::{SearchHit, SearchResults};
use cloak_core::traits::ISearchProvider;
use serde_json::Value;
use tracing::debug;

/// `GET {endpoint}?q=..&num=..&api_key=..`, reading `organic_results`.
pub struct HttpSearchProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
    max_results: usize,
}

impl std::fmt::Debug for HttpSearchProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSearchProvider")
            .field("endpoint", &self.endpoint)
            .field("max_results", &self.max_results)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl HttpSearchProvider {
    pub fn from_config(config: &SearchConfig) -> CloakResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: &SearchConfig, api_key: Option<String>) -> CloakResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| SearchError::Unavailable {
                reason: format!("http client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            max_results: config.max_results,
        })
    }
}

impl ISearchProvider for HttpSearchProvider {
    fn search(&self, query: &str) -> CloakResult<SearchResults> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SearchError::CredentialMissing {
                env_var: self.api_key_env.clone(),
            }
            .into());
        };

        let num = self.max_results.to_string();
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("num", num.as_str()), ("api_key", api_key)])
            .send()
            .map_err(|e| SearchError::Unavailable {
                reason: e.without_url().to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Unavailable {
                reason: format!("HTTP {status}"),
            }
            .into());
        }

        let body: Value = resp.json().map_err(|e| SearchError::Unavailable {
            reason: format!("invalid response body: {}", e.without_url()),
        })?;
        let results = parse_results(query, body, self.max_results);
        debug!(hits = results.hits.len(), "search complete");
        Ok(results)
    }

    fn name(&self) -> &str {
        "serpapi"
    }
}

/// Read up to `max` hits from `organic_results`, keeping the raw body.
/// Missing fields become empty strings; a body without results yields none.
pub fn parse_results(query: &str, body: Value, max: usize) -> SearchResults {
    let hits = body
        .get("organic_results")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(max)
                .map(|item| SearchHit {
                    title: str_field(item, "title"),
                    url: str_field(item, "link"),
                    snippet: str_field(item, "snippet"),
                })
                .collect()
        })
        .unwrap_or_default();

    SearchResults {
        query: query.to_string(),
        hits,
        raw: Some(body),
    }
}

fn str_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
