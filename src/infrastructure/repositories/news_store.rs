use crate::domain::news::NewsItem;
use crate::infrastructure::github::GitHubError;
use async_trait::async_trait;

/// Which backend a [`NewsStore`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    GitHub,
}

#[derive(Debug, thiserror::Error)]
pub enum NewsStoreError {
    #[error("remote store error: {0}")]
    Remote(#[from] GitHubError),
    #[error("failed to encode feed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage for the news feed.
///
/// Implementations keep at most ten items, newest first. `append` inserts at
/// the head and evicts from the tail.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Insert an item at the head of the feed and persist the result
    async fn append(&self, item: NewsItem) -> Result<(), NewsStoreError>;

    /// Current feed contents, newest first
    async fn list(&self) -> Result<Vec<NewsItem>, NewsStoreError>;

    fn backend(&self) -> StoreBackend;
}
