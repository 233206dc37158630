//! Secure session storage error types.

use thiserror::Error;

/// Failures of the platform credential store.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SecretError {
    #[error("cannot open credential entry '{entry}': {message}")]
    AccessFailed { entry: String, message: String },

    #[error("cannot read credential entry '{entry}': {message}")]
    ReadFailed { entry: String, message: String },

    #[error("cannot write credential entry '{entry}': {message}")]
    WriteFailed { entry: String, message: String },

    #[error("cannot delete credential entry '{entry}': {message}")]
    DeleteFailed { entry: String, message: String },
}
