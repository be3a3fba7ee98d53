use serde::{Deserialize, Serialize};

/// Structured results of one web search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// The query exactly as sent to the provider (always masked).
    pub query: String,
    pub hits: Vec<SearchHit>,
    /// Raw provider response, kept for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}
