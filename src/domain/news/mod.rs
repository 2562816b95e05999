pub mod error;
pub mod feed;
pub mod model;
pub mod normalizer;
pub mod service;

pub use error::NewsServiceError;
pub use feed::{BoundedFeed, MAX_FEED_ITEMS};
pub use model::{DiscordAuthor, DiscordMessage, NewsItem, DEFAULT_AUTHOR};
pub use normalizer::{normalize, Normalized, RejectReason};
pub use service::{NewsService, NewsServiceApi, PublishOutcome};
