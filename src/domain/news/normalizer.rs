use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use super::error::NewsServiceError;
use super::model::{DiscordMessage, NewsItem, DEFAULT_AUTHOR};

/// Outcome of normalizing an inbound Discord message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Accepted(NewsItem),
    Rejected(RejectReason),
}

/// Why a message was dropped without touching the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyContent,
    BotAuthor,
}

/// Convert a raw Discord message into a news item.
///
/// `now` is used when the message carries no timestamp. Bot-authored and
/// blank messages are rejected; an unparseable timestamp is an error.
pub fn normalize(
    message: DiscordMessage,
    now: DateTime<Utc>,
) -> Result<Normalized, NewsServiceError> {
    let content = message.content.unwrap_or_default();
    let (username, is_bot) = match message.author {
        Some(author) => (author.username, author.bot.unwrap_or(false)),
        None => (None, false),
    };

    if content.trim().is_empty() {
        return Ok(Normalized::Rejected(RejectReason::EmptyContent));
    }
    if is_bot {
        return Ok(Normalized::Rejected(RejectReason::BotAuthor));
    }

    let timestamp = message
        .timestamp
        .filter(|ts| !ts.is_empty())
        .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));
    let formatted_date = format_long_date(&timestamp)?;

    Ok(Normalized::Accepted(NewsItem {
        content,
        author: username
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        timestamp,
        formatted_date,
    }))
}

/// Render an ISO-8601 timestamp as an en-US long date, e.g. "October 4, 2024".
///
/// Timestamps without an offset are read as UTC.
pub fn format_long_date(timestamp: &str) -> Result<String, NewsServiceError> {
    let date = if let Ok(instant) = DateTime::parse_from_rfc3339(timestamp) {
        instant.with_timezone(&Utc).date_naive()
    } else if let Ok(local) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        local.date()
    } else if let Ok(local) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M") {
        local.date()
    } else {
        NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").map_err(|_| {
            NewsServiceError::InvalidPayload(format!("invalid timestamp: {}", timestamp))
        })?
    };

    Ok(date.format("%B %-d, %Y").to_string())
}
