//! Geocoding port definition.

use async_trait::async_trait;

use crate::domain::entities::Coordinates;
use crate::domain::errors::GeocodeError;

/// Best match for a forward lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    /// Canonical place label.
    pub label: String,
    /// Position of the match.
    pub coordinates: Coordinates,
}

/// Port for forward and reverse geocoding.
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolves free text to the single best match, `None` when nothing matched.
    async fn search(&self, query: &str) -> Result<Option<GeocodeMatch>, GeocodeError>;

    /// Resolves a coordinate to a place label, `None` when the service has none.
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>, GeocodeError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted geocoder.
    #[derive(Default)]
    pub struct MockGeocoder {
        pub search_result: Mutex<Option<GeocodeMatch>>,
        pub reverse_label: Mutex<Option<String>>,
        pub fail: bool,
        pub delay: Option<Duration>,
        pub calls: AtomicUsize,
    }

    impl MockGeocoder {
        /// Geocoder that fails every lookup.
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        /// Geocoder answering reverse lookups with `label`.
        pub fn with_label(label: &str) -> Self {
            Self {
                reverse_label: Mutex::new(Some(label.to_string())),
                ..Self::default()
            }
        }

        async fn pause(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    #[async_trait]
    impl GeocodingPort for MockGeocoder {
        async fn search(&self, _query: &str) -> Result<Option<GeocodeMatch>, GeocodeError> {
            self.pause().await;
            if self.fail {
                return Err(GeocodeError::Network("connection refused".to_string()));
            }
            Ok(self.search_result.lock().unwrap().clone())
        }

        async fn reverse(&self, _coordinates: Coordinates) -> Result<Option<String>, GeocodeError> {
            self.pause().await;
            if self.fail {
                return Err(GeocodeError::Status(503));
            }
            Ok(self.reverse_label.lock().unwrap().clone())
        }
    }
}
