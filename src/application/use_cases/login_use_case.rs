//! Sign-in and sign-out.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, SessionStoragePort};

/// Banner text when the backend gives no reason for a failed sign-in.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Invalid credentials or server error.";

/// Handles the sign-in workflow and session teardown.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    /// Returns a validation error when a field is empty (no request is sent),
    /// otherwise the backend's error.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        request.validate()?;

        debug!(email = %request.email, "Attempting login");

        let session = self
            .auth_port
            .login(request.email.trim(), &request.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "Login rejected");
                e
            })?;

        info!(
            username = %session.display_name(),
            token = %session.token(),
            "Successfully authenticated"
        );

        let session_persisted = if request.persist_session {
            match self.storage_port.store_session(&session).await {
                Ok(()) => {
                    info!("Session persisted to secure storage");
                    true
                }
                Err(e) => {
                    error!(error = %e, "Failed to persist session to secure storage");
                    false
                }
            }
        } else {
            debug!("Session persistence disabled, skipping storage");
            false
        };

        Ok(LoginResponse {
            session,
            session_persisted,
        })
    }

    /// Clears the stored token and username.
    ///
    /// # Errors
    /// Returns error if the secure storage refuses the deletion.
    pub async fn logout(&self) -> Result<(), ApiError> {
        debug!("Deleting session from secure storage");
        match self.storage_port.delete_session().await {
            Ok(()) => {
                info!("Session deleted from secure storage");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to delete session from secure storage");
                Err(e)
            }
        }
    }
}
