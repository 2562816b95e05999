use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::news_store::{NewsStore, NewsStoreError, StoreBackend};
use crate::domain::news::{BoundedFeed, NewsItem};
use crate::infrastructure::github::{
    decode_content, encode_content, GitHubContentsClient, PutFileRequest,
};

const COMMIT_PREVIEW_CHARS: usize = 50;

/// Shape of one entry in the JSON file kept in the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredNewsItem {
    content: String,
    author: String,
    timestamp: String,
    #[serde(alias = "formattedDate")]
    date: String,
}

impl From<NewsItem> for StoredNewsItem {
    fn from(item: NewsItem) -> Self {
        Self {
            content: item.content,
            author: item.author,
            timestamp: item.timestamp,
            date: item.formatted_date,
        }
    }
}

impl From<StoredNewsItem> for NewsItem {
    fn from(stored: StoredNewsItem) -> Self {
        Self {
            content: stored.content,
            author: stored.author,
            timestamp: stored.timestamp,
            formatted_date: stored.date,
        }
    }
}

/// Feed persisted as a JSON file in a GitHub repository.
///
/// Every append re-reads the file to pick up its current sha, then rewrites
/// it. Appends from this process are serialized; writers in other processes
/// can still overwrite each other (last write wins).
pub struct GitHubNewsRepository {
    client: GitHubContentsClient,
    file_path: String,
    branch: Option<String>,
    write_lock: Mutex<()>,
}

impl GitHubNewsRepository {
    pub fn new(client: GitHubContentsClient, file_path: String, branch: Option<String>) -> Self {
        Self {
            client,
            file_path,
            branch,
            write_lock: Mutex::new(()),
        }
    }

    /// Load the current feed and the file sha. Any failure degrades to an
    /// empty feed.
    async fn load(&self) -> (BoundedFeed, Option<String>) {
        let file = match self
            .client
            .get_file(&self.file_path, self.branch.as_deref())
            .await
        {
            Ok(Some(file)) => file,
            Ok(None) => {
                tracing::info!(path = %self.file_path, "News file not found, starting empty");
                return (BoundedFeed::new(), None);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.file_path,
                    "Failed to fetch news file, starting empty"
                );
                return (BoundedFeed::new(), None);
            }
        };

        let feed = match decode_content(&file.content) {
            Ok(json) => decode_feed(&json),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.file_path, "News file is not valid base64");
                BoundedFeed::new()
            }
        };

        (feed, Some(file.sha))
    }
}

#[async_trait]
impl NewsStore for GitHubNewsRepository {
    async fn append(&self, item: NewsItem) -> Result<(), NewsStoreError> {
        let _guard = self.write_lock.lock().await;

        let (mut feed, sha) = self.load().await;
        let message = format!("Update news: {}", commit_preview(&item.content));
        feed.insert(item);

        let request = PutFileRequest {
            message,
            content: encode_content(&encode_feed(&feed)?),
            sha,
            branch: self.branch.clone(),
        };
        self.client.put_file(&self.file_path, &request).await?;

        tracing::info!(
            path = %self.file_path,
            feed_len = feed.len(),
            "News file updated"
        );
        Ok(())
    }

    async fn list(&self) -> Result<Vec<NewsItem>, NewsStoreError> {
        let (feed, _) = self.load().await;
        Ok(feed.into_items())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::GitHub
    }
}

/// Serialize a feed into the JSON document stored in the repository.
fn encode_feed(feed: &BoundedFeed) -> Result<String, serde_json::Error> {
    let stored: Vec<StoredNewsItem> = feed
        .items()
        .iter()
        .cloned()
        .map(StoredNewsItem::from)
        .collect();
    serde_json::to_string_pretty(&stored)
}

/// Parse the stored JSON document. Anything unreadable yields an empty feed.
fn decode_feed(json: &str) -> BoundedFeed {
    match serde_json::from_str::<Vec<StoredNewsItem>>(json) {
        Ok(stored) => BoundedFeed::from_items(stored.into_iter().map(NewsItem::from).collect()),
        Err(e) => {
            tracing::warn!(error = %e, "News file is not a JSON array of items, starting empty");
            BoundedFeed::new()
        }
    }
}

fn commit_preview(content: &str) -> String {
    let mut chars = content.chars();
    let preview: String = chars.by_ref().take(COMMIT_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}
