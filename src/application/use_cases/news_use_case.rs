//! News posts attached to activities.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::activity_use_case::signed_out;
use crate::application::dto::NewsForm;
use crate::domain::entities::{ActivityId, News, NewsId, Session};
use crate::domain::errors::ApiError;
use crate::domain::ports::NewsPort;

/// Banner text when posts fail to load.
pub const LOAD_NEWS_FALLBACK: &str = "Failed to load news.";
/// Banner text when saving a post fails without a server reason.
pub const SAVE_NEWS_FALLBACK: &str = "Failed to save news. Please try again.";
/// Banner text when deleting a post fails without a server reason.
pub const DELETE_NEWS_FALLBACK: &str = "Failed to delete news.";

/// News CRUD through the backend.
#[derive(Clone)]
pub struct NewsUseCase {
    port: Arc<dyn NewsPort>,
}

impl NewsUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(port: Arc<dyn NewsPort>) -> Self {
        Self { port }
    }

    /// Lists posts for an activity.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn list(&self, activity_id: &ActivityId) -> Result<Vec<News>, ApiError> {
        let news = self.port.list_news(activity_id).await?;
        debug!(activity_id = %activity_id, count = news.len(), "Loaded news");
        Ok(news)
    }

    /// Fetches one post.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn get(&self, id: &NewsId) -> Result<News, ApiError> {
        self.port.get_news(id).await
    }

    /// Validates and creates a post, or replaces `existing` when given.
    ///
    /// # Errors
    /// Returns a validation error before any request, a local unauthorized
    /// error without a session, or the backend error.
    pub async fn save(
        &self,
        session: Option<&Session>,
        existing: Option<&NewsId>,
        form: &NewsForm,
    ) -> Result<(), ApiError> {
        let draft = form.validate()?;
        let session = session.ok_or_else(signed_out)?;

        let result = match existing {
            Some(id) => self.port.update_news(session.token(), id, &draft).await,
            None => self.port.create_news(session.token(), &draft).await,
        };

        result.map_err(|e| {
            warn!(activity_id = %draft.activity_id, error = %e, "Failed to save news");
            e
        })?;

        info!(activity_id = %draft.activity_id, title = %draft.title, "News saved");
        Ok(())
    }

    /// Deletes a post.
    ///
    /// # Errors
    /// Returns a local unauthorized error without a session, or the backend error.
    pub async fn delete(&self, session: Option<&Session>, id: &NewsId) -> Result<(), ApiError> {
        let session = session.ok_or_else(signed_out)?;
        self.port.delete_news(session.token(), id).await?;
        info!(news_id = %id, "News deleted");
        Ok(())
    }
}
