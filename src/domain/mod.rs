//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Toast notifications.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use entities::{Activity, AuthToken, Location, News, Session};
pub use errors::{ApiError, GeocodeError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{ActivityPort, AuthPort, GeocodingPort, NewsPort, SessionStoragePort};
