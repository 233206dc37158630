//! Startup session resolution.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::SessionSource;
use crate::domain::entities::{AuthToken, Session};
use crate::domain::errors::ApiError;
use crate::domain::ports::SessionStoragePort;

/// Session together with where it was found.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    /// The session.
    pub session: Session,
    /// Source of the session.
    pub source: SessionSource,
}

/// Finds an existing session so the app can start signed in.
pub struct ResolveSessionUseCase {
    storage_port: Arc<dyn SessionStoragePort>,
}

impl ResolveSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self { storage_port }
    }

    /// Resolves the session from the keyring, then from a CLI/env token.
    ///
    /// # Errors
    /// Currently infallible; keyring failures are logged and skipped.
    pub async fn execute(
        &self,
        cli_token: Option<String>,
    ) -> Result<Option<ResolvedSession>, ApiError> {
        debug!("Checking keyring for stored session");
        match self.storage_port.get_session().await {
            Ok(Some(session)) => {
                info!(username = %session.display_name(), "Using session from system keyring");
                return Ok(Some(ResolvedSession {
                    session,
                    source: SessionSource::Keyring,
                }));
            }
            Ok(None) => debug!("No session found in keyring"),
            Err(e) => debug!(error = %e, "Failed to check keyring"),
        }

        if let Some(token) = cli_token.and_then(AuthToken::new) {
            info!(token = %token, "Using token from command line / environment");
            return Ok(Some(ResolvedSession {
                session: Session::new(token, None),
                source: SessionSource::CommandLine,
            }));
        }

        debug!("No session found in any source");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockSessionStorage;

    fn stored() -> Session {
        Session::new(
            AuthToken::new("stored-token").unwrap(),
            Some("Rina".to_string()),
        )
    }

    #[tokio::test]
    async fn test_keyring_priority() {
        let use_case = ResolveSessionUseCase::new(Arc::new(MockSessionStorage::with_session(
            stored(),
        )));

        let resolved = use_case
            .execute(Some("cli-token".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.source, SessionSource::Keyring);
        assert_eq!(resolved.session.display_name(), "Rina");
    }

    #[tokio::test]
    async fn test_cli_fallback() {
        let use_case = ResolveSessionUseCase::new(Arc::new(MockSessionStorage::new()));

        let resolved = use_case
            .execute(Some("cli-token".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.source, SessionSource::CommandLine);
        assert_eq!(resolved.session.token().as_str(), "cli-token");
    }

    #[tokio::test]
    async fn test_no_session_found() {
        let use_case = ResolveSessionUseCase::new(Arc::new(MockSessionStorage::new()));

        assert!(use_case.execute(Some("   ".to_string())).await.unwrap().is_none());
        assert!(use_case.execute(None).await.unwrap().is_none());
    }
}
