//! News editor form.

use crate::domain::entities::{ActivityId, News};
use crate::domain::errors::ApiError;
use crate::domain::ports::NewsDraft;

/// Editable copy of a news post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsForm {
    /// Owning activity.
    pub activity_id: ActivityId,
    /// Headline, required.
    pub title: String,
    /// Body, required.
    pub content: String,
    /// Image URLs in display order.
    pub images: Vec<String>,
}

impl NewsForm {
    /// Creates an empty form for a new post.
    #[must_use]
    pub fn new(activity_id: ActivityId) -> Self {
        Self {
            activity_id,
            title: String::new(),
            content: String::new(),
            images: Vec::new(),
        }
    }

    /// Pre-fills the form from an existing post.
    #[must_use]
    pub fn from_news(news: &News) -> Self {
        Self {
            activity_id: news.activity_id.clone(),
            title: news.title.clone(),
            content: news.content.clone(),
            images: news.images.clone(),
        }
    }

    /// Checks required fields and builds the request body.
    ///
    /// # Errors
    /// Returns a validation error when title or content is missing.
    pub fn validate(&self) -> Result<NewsDraft, ApiError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ApiError::validation("Title and content are required."));
        }

        Ok(NewsDraft {
            activity_id: self.activity_id.clone(),
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            images: self
                .images
                .iter()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_title_and_content() {
        let mut form = NewsForm::new(ActivityId::new("a1"));
        form.title = "Update".to_string();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Title and content are required."
        );
    }

    #[test]
    fn test_draft_carries_owner() {
        let mut form = NewsForm::new(ActivityId::new("a1"));
        form.title = " Day two ".to_string();
        form.content = "Forty bags collected.".to_string();
        form.images = vec![" ".to_string(), "https://img/n.jpg".to_string()];

        let json = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "activityId": "a1",
                "title": "Day two",
                "content": "Forty bags collected.",
                "images": ["https://img/n.jpg"]
            })
        );
    }
}
