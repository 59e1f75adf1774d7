//! Web searcher trait: the Search Gateway seam.
//!
//! One call, one outbound request. Provider failures come back as run-level
//! [`LeadError`](crate::error::LeadError) values; an empty `Vec` means the
//! provider simply found nothing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{hit::RawHit, query::SearchQuery};

/// Search the web for news matching a query.
///
/// # Implementations
///
/// - `SerpApiSearcher` - SerpAPI Google search (feature `serpapi`)
/// - `MockWebSearcher` - For testing
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Run the query. Hits come back in provider rank order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawHit>>;
}

#[async_trait]
impl<T: WebSearcher + ?Sized> WebSearcher for std::sync::Arc<T> {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawHit>> {
        (**self).search(query).await
    }
}
