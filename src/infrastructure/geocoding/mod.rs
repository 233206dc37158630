//! Geocoding adapters.

mod nominatim;

pub use nominatim::{DEFAULT_GEOCODER_URL, NominatimClient, parse_reverse, parse_search};
