use super::model::NewsItem;

/// Maximum number of items a feed retains.
pub const MAX_FEED_ITEMS: usize = 10;

/// Newest-first list of news items, never longer than [`MAX_FEED_ITEMS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundedFeed {
    items: Vec<NewsItem>,
}

impl BoundedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a feed from items already in newest-first order, dropping
    /// anything past the cap.
    pub fn from_items(mut items: Vec<NewsItem>) -> Self {
        items.truncate(MAX_FEED_ITEMS);
        Self { items }
    }

    pub fn insert(&mut self, item: NewsItem) {
        self.items.insert(0, item);
        self.items.truncate(MAX_FEED_ITEMS);
    }

    pub fn snapshot(&self) -> Vec<NewsItem> {
        self.items.clone()
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<NewsItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
