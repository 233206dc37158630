//! Activity listing and editing.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::ActivityForm;
use crate::domain::entities::{Activity, ActivityId, Session};
use crate::domain::errors::ApiError;
use crate::domain::ports::ActivityPort;

/// Banner text when the activity list fails to load.
pub const LIST_ACTIVITIES_FALLBACK: &str = "Failed to load activities. Please try again later.";
/// Banner text when an activity fails to load.
pub const LOAD_ACTIVITY_FALLBACK: &str = "Failed to load activity details. Please try again later.";
/// Banner text when creating fails without a server reason.
pub const CREATE_ACTIVITY_FALLBACK: &str = "Failed to create activity. Please try again.";
/// Banner text when the edit form cannot load its activity.
pub const EDIT_LOAD_FALLBACK: &str = "Failed to load activity. Please try again.";
/// Banner text when updating fails without a server reason.
pub const UPDATE_ACTIVITY_FALLBACK: &str = "Failed to update activity. Please try again.";
/// Banner text when deleting fails without a server reason.
pub const DELETE_ACTIVITY_FALLBACK: &str = "Failed to delete activity.";

/// Returns the local error raised when a mutation is attempted signed out.
pub(crate) fn signed_out() -> ApiError {
    ApiError::Unauthorized {
        message: Some("Please log in to continue.".to_string()),
    }
}

/// Activity CRUD through the backend.
#[derive(Clone)]
pub struct ActivityUseCase {
    port: Arc<dyn ActivityPort>,
}

impl ActivityUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(port: Arc<dyn ActivityPort>) -> Self {
        Self { port }
    }

    /// Lists all activities.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn list(&self) -> Result<Vec<Activity>, ApiError> {
        let activities = self.port.list_activities().await?;
        debug!(count = activities.len(), "Loaded activities");
        Ok(activities)
    }

    /// Fetches one activity.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn get(&self, id: &ActivityId) -> Result<Activity, ApiError> {
        self.port.get_activity(id).await.map_err(|e| {
            warn!(activity_id = %id, error = %e, "Failed to load activity");
            e
        })
    }

    /// Validates the form and creates the activity.
    ///
    /// # Errors
    /// Returns a validation error before any request, a local unauthorized
    /// error without a session, or the backend error.
    pub async fn create(&self, session: Option<&Session>, form: &ActivityForm) -> Result<(), ApiError> {
        let draft = form.validate()?;
        let session = session.ok_or_else(signed_out)?;

        self.port.create_activity(session.token(), &draft).await.map_err(|e| {
            warn!(error = %e, "Failed to create activity");
            e
        })?;

        info!(title = %draft.title, "Activity created");
        Ok(())
    }

    /// Validates the form and replaces the activity.
    ///
    /// # Errors
    /// Same as [`Self::create`].
    pub async fn update(
        &self,
        session: Option<&Session>,
        id: &ActivityId,
        form: &ActivityForm,
    ) -> Result<(), ApiError> {
        let draft = form.validate()?;
        let session = session.ok_or_else(signed_out)?;

        self.port
            .update_activity(session.token(), id, &draft)
            .await
            .map_err(|e| {
                warn!(activity_id = %id, error = %e, "Failed to update activity");
                e
            })?;

        info!(activity_id = %id, "Activity updated");
        Ok(())
    }

    /// Deletes the activity.
    ///
    /// # Errors
    /// Returns a local unauthorized error without a session, or the backend error.
    pub async fn delete(&self, session: Option<&Session>, id: &ActivityId) -> Result<(), ApiError> {
        let session = session.ok_or_else(signed_out)?;

        self.port.delete_activity(session.token(), id).await.map_err(|e| {
            warn!(activity_id = %id, error = %e, "Failed to delete activity");
            e
        })?;

        info!(activity_id = %id, "Activity deleted");
        Ok(())
    }
}
