//! Authentication DTOs.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::entities::Session;
use crate::domain::errors::ApiError;

/// Where the active session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Session restored from the system keyring.
    Keyring,
    /// Token passed on the command line or environment.
    CommandLine,
    /// Fresh sign-in.
    Login,
}

impl SessionSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Keyring => "system keyring",
            Self::CommandLine => "command line",
            Self::Login => "sign-in",
        }
    }
}

impl fmt::Display for SessionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Sign-in form data. The password is wiped from memory on drop.
#[derive(Clone)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: Zeroizing<String>,
    /// Whether to keep the session in the keyring.
    pub persist_session: bool,
}

impl LoginRequest {
    /// Creates new login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
            persist_session: true,
        }
    }

    /// Disables session persistence.
    #[must_use]
    pub fn without_persistence(mut self) -> Self {
        self.persist_session = false;
        self
    }

    /// Checks that both fields are filled in.
    ///
    /// # Errors
    /// Returns a validation error naming the missing input.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::validation("Please enter email and password."));
        }
        Ok(())
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("persist_session", &self.persist_session)
            .finish()
    }
}

/// Sign-in result.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// New session.
    pub session: Session,
    /// Whether the session reached the keyring.
    pub session_persisted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_both_fields() {
        assert!(LoginRequest::new("", "secret").validate().is_err());
        assert!(LoginRequest::new("a@b.c", "").validate().is_err());
        assert!(LoginRequest::new("a@b.c", "secret").validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_password() {
        let request = LoginRequest::new("a@b.c", "hunter2");
        let output = format!("{request:?}");
        assert!(!output.contains("hunter2"));
        assert!(output.contains("a@b.c"));
    }
}
