//! Session storage port definition.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::ApiError;

/// Port for session persistence operations.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves stored session.
    async fn get_session(&self) -> Result<Option<Session>, ApiError>;

    /// Stores session securely.
    async fn store_session(&self, session: &Session) -> Result<(), ApiError>;

    /// Deletes stored session.
    async fn delete_session(&self) -> Result<(), ApiError>;

    /// Checks if a session exists.
    async fn has_session(&self) -> Result<bool, ApiError> {
        Ok(self.get_session().await?.is_some())
    }
}
