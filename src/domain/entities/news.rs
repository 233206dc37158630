//! News posts attached to an activity.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::ActivityId;
use crate::domain::serde_utils::string_or_number;

/// Backend news identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NewsId(String);

impl NewsId {
    /// Creates new id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns id as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for NewsId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_or_number::deserialize(deserializer).map(Self)
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A news post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    /// News id.
    #[serde(alias = "_id")]
    pub id: NewsId,
    /// Owning activity.
    pub activity_id: ActivityId,
    /// Headline.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
    /// Ordered image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Creation timestamp, ISO 8601.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp, ISO 8601.
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_news() {
        let news: News = serde_json::from_str(
            r#"{"_id": "n1", "activityId": 12, "title": "Day one", "content": "We started.", "createdAt": "2025-03-01T08:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(news.id.as_str(), "n1");
        assert_eq!(news.activity_id.as_str(), "12");
        assert!(news.images.is_empty());
        assert_eq!(news.created_at.as_deref(), Some("2025-03-01T08:00:00Z"));
    }

    #[test]
    fn test_news_requires_owner() {
        let result = serde_json::from_str::<News>(r#"{"id": "n1", "title": "Orphan"}"#);
        assert!(result.is_err());
    }
}
