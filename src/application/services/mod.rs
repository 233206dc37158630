//! Application services.

mod geocode_tasks;
mod location_picker;
mod map_viewport;
mod notification_manager;

pub use geocode_tasks::{GeocodeOutcome, GeocodeTasks};
pub use location_picker::{LocationPicker, RequestGenerations, ReverseRequest, SearchRequest};
pub use map_viewport::{MAX_ZOOM, MapViewport, SEARCH_ZOOM, wrap_longitude};
pub use notification_manager::NotificationManager;
