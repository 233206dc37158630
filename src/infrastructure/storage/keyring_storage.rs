//! Keyring-based session storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::{AuthToken, Session};
use crate::domain::errors::{ApiError, SecretError};
use crate::domain::ports::SessionStoragePort;

const KEYRING_SERVICE: &str = "careconnect";
const TOKEN_ENTRY: &str = "access_token";
const USERNAME_ENTRY: &str = "username";

/// Stores the bearer token and username in the system keyring.
pub struct KeyringSessionStorage {
    service: String,
}

impl KeyringSessionStorage {
    /// Creates new storage under the default service name.
    #[must_use]
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    /// Creates storage under a custom service name.
    #[must_use]
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, name: &str) -> Result<Entry, SecretError> {
        Entry::new(&self.service, name).map_err(|e| SecretError::AccessFailed {
            entry: name.to_string(),
            message: e.to_string(),
        })
    }

    fn read(&self, name: &str) -> Result<Option<String>, SecretError> {
        match self.entry(name)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SecretError::ReadFailed {
                entry: name.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write(&self, name: &str, value: &str) -> Result<(), SecretError> {
        self.entry(name)?
            .set_password(value)
            .map_err(|e| SecretError::WriteFailed {
                entry: name.to_string(),
                message: e.to_string(),
            })
    }

    fn remove(&self, name: &str) -> Result<(), SecretError> {
        match self.entry(name)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretError::DeleteFailed {
                entry: name.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn get_session(&self) -> Result<Option<Session>, ApiError> {
        debug!(service = %self.service, "Retrieving session from keyring");

        let Some(token) = self.read(TOKEN_ENTRY)?.and_then(AuthToken::new) else {
            debug!("No token stored in keyring");
            return Ok(None);
        };

        let username = self.read(USERNAME_ENTRY).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read username from keyring");
            None
        });

        Ok(Some(Session::new(token, username)))
    }

    async fn store_session(&self, session: &Session) -> Result<(), ApiError> {
        debug!(service = %self.service, "Storing session in keyring");

        self.write(TOKEN_ENTRY, session.token().as_str())?;
        match session.username() {
            Some(name) => self.write(USERNAME_ENTRY, name)?,
            None => self.remove(USERNAME_ENTRY)?,
        }

        debug!("Session stored successfully");
        Ok(())
    }

    async fn delete_session(&self) -> Result<(), ApiError> {
        debug!(service = %self.service, "Deleting session from keyring");

        let token = self.remove(TOKEN_ENTRY);
        let username = self.remove(USERNAME_ENTRY);
        token?;
        username?;

        debug!("Session deleted from keyring");
        Ok(())
    }
}
