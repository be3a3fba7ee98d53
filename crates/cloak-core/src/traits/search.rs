use crate::errors::CloakResult;
use crate::models::SearchResults;

/// Web search capability. Failures surface as `SearchError::Unavailable`;
/// retrying is the provider's concern.
pub trait ISearchProvider: Send + Sync {
    fn search(&self, query: &str) -> CloakResult<SearchResults>;

    fn name(&self) -> &str;
}
