mod activity_port;
mod auth_port;
mod geocoding_port;
mod news_port;
mod session_storage_port;

pub use activity_port::{ActivityDraft, ActivityPort};
pub use auth_port::AuthPort;
pub use geocoding_port::{GeocodeMatch, GeocodingPort};
pub use news_port::{NewsDraft, NewsPort};
pub use session_storage_port::SessionStoragePort;
