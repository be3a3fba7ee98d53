// Single source of truth for all default values.

// --- Config file ---
pub const DEFAULT_CONFIG_FILENAME: &str = "cloak.toml";

// --- Privacy ---
pub const DEFAULT_CLASSIFIER_ENABLED: bool = true;
pub const DEFAULT_CLASSIFIER_MAX_TOKENS: u32 = 1_024;
pub const DEFAULT_DETECT_EMAILS: bool = true;
pub const DEFAULT_DETECT_PHONES: bool = true;
pub const DEFAULT_DETECT_IDS: bool = true;
pub const DEFAULT_NAME_FALLBACK: bool = false;

// --- Generation ---
pub const DEFAULT_GENERATION_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GENERATION_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_ANSWER_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;

// --- Search ---
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://serpapi.com/search.json";
pub const DEFAULT_SEARCH_API_KEY_ENV: &str = "SERPAPI_API_KEY";
pub const DEFAULT_SEARCH_MAX_RESULTS: usize = 5;
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 30;

// --- Retry ---
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3; // 1 call + 2 retries
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1_000;
pub const DEFAULT_BACKOFF_MULTIPLIER: u32 = 2;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 8_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
pub const DEFAULT_INCLUDE_SEARCH_DIAGNOSTICS: bool = true;
