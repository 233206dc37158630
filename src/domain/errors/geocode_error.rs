//! Geocoding error types.

use thiserror::Error;

/// Failures talking to the geocoding service. Never shown to the user.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum GeocodeError {
    #[error("geocoder unreachable: {0}")]
    Network(String),

    #[error("geocoder returned HTTP {0}")]
    Status(u16),

    #[error("unreadable geocoder response: {0}")]
    Decode(String),
}
