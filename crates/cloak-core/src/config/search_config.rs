use serde::{Deserialize, Serialize};

use super::defaults;

/// Web search provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub max_results: usize,
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_SEARCH_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_SEARCH_API_KEY_ENV.to_string(),
            max_results: defaults::DEFAULT_SEARCH_MAX_RESULTS,
            timeout_secs: defaults::DEFAULT_SEARCH_TIMEOUT_SECS,
        }
    }
}
