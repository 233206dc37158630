//! Named map locations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name shown when an activity has no location name.
pub const LOCATION_PLACEHOLDER: &str = "Location TBA";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lng: f64,
}

impl Coordinates {
    /// Jakarta, the map center used when nothing else is known.
    pub const JAKARTA: Self = Self {
        lat: -6.2088,
        lng: 106.8456,
    };

    /// Creates new coordinates.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns whether both values are finite and in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Placeholder name used until reverse geocoding answers.
    #[must_use]
    pub fn provisional_name(&self) -> String {
        format!("Location ({}, {})", fixed4(self.lat), fixed4(self.lng))
    }
}

/// Four-decimal rendering that rounds exact ties away from zero and never
/// prints negative zero, so names match the web dashboard's.
fn fixed4(value: f64) -> String {
    let magnitude = value.abs();
    let exact = format!("{magnitude:.80}");
    let tie = exact.split_once('.').is_some_and(|(_, fraction)| {
        fraction
            .get(4..)
            .and_then(|rest| rest.strip_prefix('5'))
            .is_some_and(|rest| rest.bytes().all(|b| b == b'0'))
    });

    let rounded = if tie {
        format!("{:.4}", magnitude + 0.000_05)
    } else {
        format!("{magnitude:.4}")
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{rounded}")
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Location attached to an activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Free-text name, always user editable.
    #[serde(default)]
    pub name: String,
    /// Latitude, if known.
    #[serde(
        default,
        deserialize_with = "crate::domain::serde_utils::lenient_f64_option::deserialize"
    )]
    pub lat: Option<f64>,
    /// Longitude, if known.
    #[serde(
        default,
        deserialize_with = "crate::domain::serde_utils::lenient_f64_option::deserialize"
    )]
    pub lng: Option<f64>,
}

impl Location {
    /// Creates a location with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lat: None,
            lng: None,
        }
    }

    /// Creates a location with a name and coordinates.
    #[must_use]
    pub fn at(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            lat: Some(coordinates.lat),
            lng: Some(coordinates.lng),
        }
    }

    /// Returns coordinates when both latitude and longitude are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }

    /// Returns the name, or the placeholder when blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            LOCATION_PLACEHOLDER
        } else {
            &self.name
        }
    }
}
