use async_trait::async_trait;
use tokio::sync::RwLock;

use super::news_store::{NewsStore, NewsStoreError, StoreBackend};
use crate::domain::news::{BoundedFeed, NewsItem};

/// Process-lifetime feed. Contents are lost on restart.
pub struct InMemoryNewsRepository {
    feed: RwLock<BoundedFeed>,
}

impl InMemoryNewsRepository {
    pub fn new(feed: BoundedFeed) -> Self {
        Self {
            feed: RwLock::new(feed),
        }
    }

    /// Feed seeded with the welcome item, as served after every restart.
    pub fn seeded() -> Self {
        Self::new(BoundedFeed::from_items(vec![NewsItem::welcome()]))
    }
}

#[async_trait]
impl NewsStore for InMemoryNewsRepository {
    async fn append(&self, item: NewsItem) -> Result<(), NewsStoreError> {
        let mut feed = self.feed.write().await;
        feed.insert(item);
        tracing::debug!(feed_len = feed.len(), "Stored news item in memory");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<NewsItem>, NewsStoreError> {
        Ok(self.feed.read().await.snapshot())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
