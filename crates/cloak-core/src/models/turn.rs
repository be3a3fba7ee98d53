use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SearchResults;
use crate::mapping::PiiMapping;

/// One completed request/response cycle. Immutable once appended to the
/// session's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub original_text: String,
    pub masked_query: String,
    pub turn_mapping: PiiMapping,
    pub masked_answer: String,
    pub final_answer: String,
    pub search: SearchResults,
    pub metrics: TurnMetrics,
}

impl Turn {
    /// Presentation view of this turn. Search diagnostics are attached only
    /// when requested.
    pub fn report(&self, include_search_diagnostics: bool) -> TurnReport {
        TurnReport {
            turn_id: self.id,
            masked_query: self.masked_query.clone(),
            turn_mapping: self.turn_mapping.clone(),
            final_answer: self.final_answer.clone(),
            search: include_search_diagnostics.then(|| SearchDiagnostics {
                request: self.search.query.clone(),
                response: self.search.raw.clone().unwrap_or_else(|| {
                    serde_json::to_value(&self.search.hits).unwrap_or(serde_json::Value::Null)
                }),
            }),
            metrics: self.metrics.clone(),
        }
    }
}

/// Timings and counts for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMetrics {
    pub mask_ms: u64,
    pub search_ms: u64,
    pub generate_ms: u64,
    pub total_ms: u64,
    /// Distinct values replaced by the deterministic pass.
    pub deterministic_matches: usize,
    /// Entries reported by the classifier pass.
    pub classifier_entries: usize,
}

/// Raw search request/response exposed for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDiagnostics {
    pub request: String,
    pub response: serde_json::Value,
}

/// Everything the presentation layer needs for one turn, as plain data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn_id: Uuid,
    pub masked_query: String,
    pub turn_mapping: PiiMapping,
    pub final_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchDiagnostics>,
    pub metrics: TurnMetrics,
}
