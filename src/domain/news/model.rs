use serde::{Deserialize, Serialize};

/// Display name used when a message arrives without an author.
pub const DEFAULT_AUTHOR: &str = "Team SharkSuit";

/// A single normalized entry of the news feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub content: String,
    pub author: String,
    pub timestamp: String,
    #[serde(rename = "formattedDate")]
    pub formatted_date: String,
}

impl NewsItem {
    /// Item every fresh in-memory feed starts with.
    pub fn welcome() -> Self {
        Self {
            content: "Welcome to Team SharkSuit! This news section will automatically update when you post messages in your Discord channel.".to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            timestamp: "2024-10-04T14:00:00.000Z".to_string(),
            formatted_date: "October 4, 2024".to_string(),
        }
    }
}

/// Discord message as delivered by the webhook. Every field is optional;
/// defaults are applied by the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscordMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<DiscordAuthor>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscordAuthor {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bot: Option<bool>,
}
