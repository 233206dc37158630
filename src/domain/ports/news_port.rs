//! News data port.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{ActivityId, AuthToken, News, NewsId};
use crate::domain::errors::ApiError;

/// Body sent when creating or updating a news post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NewsDraft {
    pub activity_id: ActivityId,
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
}

/// Port for news CRUD against the backend.
#[async_trait]
pub trait NewsPort: Send + Sync {
    /// Lists news posts belonging to an activity.
    async fn list_news(&self, activity_id: &ActivityId) -> Result<Vec<News>, ApiError>;

    /// Fetches one news post.
    async fn get_news(&self, id: &NewsId) -> Result<News, ApiError>;

    /// Creates a news post.
    async fn create_news(&self, token: &AuthToken, draft: &NewsDraft) -> Result<(), ApiError>;

    /// Replaces a news post.
    async fn update_news(
        &self,
        token: &AuthToken,
        id: &NewsId,
        draft: &NewsDraft,
    ) -> Result<(), ApiError>;

    /// Deletes a news post.
    async fn delete_news(&self, token: &AuthToken, id: &NewsId) -> Result<(), ApiError>;
}
