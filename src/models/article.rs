//! News articles as returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single news article.
///
/// The backend sends empty strings for missing optional fields; those are
/// read as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline
    pub title: String,
    /// Short summary
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Publisher name
    #[serde(default = "unknown_source")]
    pub source: String,
    /// Link to the full article
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    /// RFC 3339 publication timestamp
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<String>,
    /// Lead image
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

fn unknown_source() -> String {
    "Unknown".to_string()
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl Article {
    /// Creates an article with only a title and source.
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            source: source.into(),
            url: None,
            published_at: None,
            image_url: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the article URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the publication timestamp.
    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    /// Short publication date such as `Mar 7`.
    ///
    /// Returns an empty string when the timestamp is missing or unparseable.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|date| date.with_timezone(&Utc).format("%b %-d").to_string())
            .unwrap_or_default()
    }
}

/// Body of a successful `/api/news/{location}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewsResult {
    /// Articles, possibly empty
    #[serde(default)]
    pub articles: Vec<Article>,
    /// Server message, typically set when `articles` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Location echoed back by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl NewsResult {
    /// Creates a result holding `articles` and no message.
    #[must_use]
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles,
            message: None,
            location: None,
        }
    }

    /// Creates an empty result with an optional server message.
    pub fn empty(message: Option<String>) -> Self {
        Self {
            articles: Vec::new(),
            message,
            location: None,
        }
    }
}
