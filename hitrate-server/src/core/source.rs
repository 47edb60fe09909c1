use super::error::Result;
use super::types::Item;
use async_trait::async_trait;

/// Authoritative backing store for items.
///
/// Implementations only read: no caching, no side effects beyond the query.
/// A store that cannot be reached surfaces as
/// [`HitrateError::SourceUnavailable`](super::error::HitrateError::SourceUnavailable).
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch every item, ordered by id.
    async fn fetch_all(&self) -> Result<Vec<Item>>;
}
