//! Backend API error types.

use thiserror::Error;

/// Errors raised by calls against the CareConnect backend.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// Required input missing; raised before any request is sent.
    #[error("{message}")]
    Validation { message: String },

    #[error("not signed in")]
    Unauthorized { message: Option<String> },

    #[error("resource not found")]
    NotFound { message: Option<String> },

    #[error("server returned {status}")]
    Server { status: u16, message: Option<String> },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("session storage error: {0}")]
    Secret(#[from] super::SecretError),

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Builds the error for a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        match status {
            401 | 403 => Self::Unauthorized { message },
            404 => Self::NotFound { message },
            _ => Self::Server { status, message },
        }
    }

    /// Returns the message the server put in the response body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns text for the error banner: the validation text, the server's
    /// own message, or `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            _ => self
                .server_message()
                .map_or_else(|| fallback.to_string(), str::to_string),
        }
    }

    /// Returns whether error was raised locally before sending.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
