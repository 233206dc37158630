//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::ApiError;

/// Port for backend sign-in.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges credentials for a session.
    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::entities::AuthToken;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Mock authentication port for testing.
    pub struct MockAuthPort {
        should_succeed: Arc<AtomicBool>,
        calls: Arc<AtomicUsize>,
    }

    impl MockAuthPort {
        /// Creates new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Returns how many logins were attempted.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn login(&self, email: &str, _password: &str) -> Result<Session, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.should_succeed.load(Ordering::SeqCst) {
                let username = email.split('@').next().map(str::to_string);
                Ok(Session::new(
                    AuthToken::new("mock-token").expect("valid token"),
                    username,
                ))
            } else {
                Err(ApiError::from_status(
                    401,
                    Some("Invalid email or password".to_string()),
                ))
            }
        }
    }
}
