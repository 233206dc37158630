//! Domain error types.

mod api_error;
mod geocode_error;
mod secret_error;

pub use api_error::ApiError;
pub use geocode_error::GeocodeError;
pub use secret_error::SecretError;
