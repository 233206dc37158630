//! Domain entity definitions.

mod activity;
mod location;
mod news;
mod session;
mod token;

pub use activity::{Activity, ActivityId, Category, Donation, Volunteer, format_rupiah};
pub use location::{Coordinates, LOCATION_PLACEHOLDER, Location};
pub use news::{News, NewsId};
pub use session::Session;
pub use token::AuthToken;
