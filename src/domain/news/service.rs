use super::error::NewsServiceError;
use super::model::{DiscordMessage, NewsItem};
use super::normalizer::{normalize, Normalized, RejectReason};
use crate::infrastructure::repositories::{NewsStore, StoreBackend};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Result of publishing an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Stored(StoreBackend),
    Ignored(RejectReason),
}

pub struct NewsService {
    store: Arc<dyn NewsStore>,
}

impl NewsService {
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
pub trait NewsServiceApi: Send + Sync {
    async fn list_news(&self) -> Result<Vec<NewsItem>, NewsServiceError>;

    /// Parse a raw webhook body and append it to the feed if it qualifies.
    async fn publish(&self, body: &[u8]) -> Result<PublishOutcome, NewsServiceError>;
}

#[async_trait]
impl NewsServiceApi for NewsService {
    async fn list_news(&self) -> Result<Vec<NewsItem>, NewsServiceError> {
        Ok(self.store.list().await?)
    }

    async fn publish(&self, body: &[u8]) -> Result<PublishOutcome, NewsServiceError> {
        let message: DiscordMessage = serde_json::from_slice(body)
            .map_err(|e| NewsServiceError::InvalidPayload(e.to_string()))?;

        match normalize(message, Utc::now())? {
            Normalized::Rejected(reason) => {
                tracing::debug!(reason = ?reason, "Ignoring webhook message");
                Ok(PublishOutcome::Ignored(reason))
            }
            Normalized::Accepted(item) => {
                tracing::info!(author = %item.author, timestamp = %item.timestamp, "Publishing news item");
                self.store.append(item).await?;
                Ok(PublishOutcome::Stored(self.store.backend()))
            }
        }
    }
}
