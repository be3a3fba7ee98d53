//! Data exchanged between the pipeline stages and the presentation sink.

pub mod classifier_response;
pub mod search_results;
pub mod turn;

pub use classifier_response::ClassifierResponse;
pub use search_results::{SearchHit, SearchResults};
pub use turn::{SearchDiagnostics, Turn, TurnMetrics, TurnReport};
