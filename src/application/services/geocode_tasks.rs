//! Background geocoding lookups for the location picker.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use super::location_picker::{RequestGenerations, ReverseRequest, SearchRequest};
use crate::domain::ports::{GeocodeMatch, GeocodingPort};

/// Lookup result tagged with the generation that requested it.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    /// Forward lookup finished. `None` on failure or no match.
    Search {
        /// Request generation.
        generation: u64,
        /// Best match.
        result: Option<GeocodeMatch>,
    },
    /// Reverse lookup finished. `None` on failure or no label.
    Reverse {
        /// Request generation.
        generation: u64,
        /// Place label.
        label: Option<String>,
    },
}

/// Spawns lookups and reports outcomes over a channel.
///
/// At most one lookup of each kind runs at a time; starting another aborts
/// the previous one. Also hands out the generation counter that pickers tag
/// their requests with.
pub struct GeocodeTasks {
    geocoder: Arc<dyn GeocodingPort>,
    tx: mpsc::UnboundedSender<GeocodeOutcome>,
    generations: RequestGenerations,
    search: Option<AbortHandle>,
    reverse: Option<AbortHandle>,
}

impl GeocodeTasks {
    /// Creates a spawner reporting to `tx`.
    #[must_use]
    pub fn new(geocoder: Arc<dyn GeocodingPort>, tx: mpsc::UnboundedSender<GeocodeOutcome>) -> Self {
        Self {
            geocoder,
            tx,
            generations: RequestGenerations::default(),
            search: None,
            reverse: None,
        }
    }

    /// Counter every picker should draw its generations from.
    #[must_use]
    pub fn generations(&self) -> RequestGenerations {
        self.generations.clone()
    }

    /// Runs a forward lookup. Errors are logged and reported as no match.
    pub fn search(&mut self, request: SearchRequest) {
        self.abort_all();

        let geocoder = Arc::clone(&self.geocoder);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = match geocoder.search(&request.query).await {
                Ok(found) => {
                    if found.is_none() {
                        debug!(query = %request.query, "Search returned no match");
                    }
                    found
                }
                Err(e) => {
                    warn!(query = %request.query, error = %e, "Search failed");
                    None
                }
            };
            let outcome = GeocodeOutcome::Search {
                generation: request.generation,
                result,
            };
            if tx.send(outcome).is_err() {
                debug!("Geocode channel closed, dropping search result");
            }
        });
        self.search = Some(handle.abort_handle());
    }

    /// Runs a reverse lookup, aborting any still-running one.
    pub fn reverse(&mut self, request: ReverseRequest) {
        self.abort_reverse();

        let geocoder = Arc::clone(&self.geocoder);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let label = match geocoder.reverse(request.coordinates).await {
                Ok(label) => label,
                Err(e) => {
                    warn!(coordinates = %request.coordinates, error = %e, "Reverse geocoding failed");
                    None
                }
            };
            let outcome = GeocodeOutcome::Reverse {
                generation: request.generation,
                label,
            };
            if tx.send(outcome).is_err() {
                debug!("Geocode channel closed, dropping reverse result");
            }
        });
        self.reverse = Some(handle.abort_handle());
    }

    /// Aborts any running lookup. Used when a click supersedes a search,
    /// and when the picker closes or the screen changes.
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.search.take() {
            if !handle.is_finished() {
                debug!("Aborting superseded search");
            }
            handle.abort();
        }
        self.abort_reverse();
    }

    fn abort_reverse(&mut self) {
        if let Some(handle) = self.reverse.take() {
            if !handle.is_finished() {
                debug!("Aborting superseded reverse lookup");
            }
            handle.abort();
        }
    }
}

impl Drop for GeocodeTasks {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Coordinates;
    use crate::domain::ports::mocks::MockGeocoder;
    use std::time::Duration;

    #[tokio::test]
    async fn test_reverse_outcome_is_tagged() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = GeocodeTasks::new(Arc::new(MockGeocoder::with_label("Monas")), tx);

        tasks.reverse(ReverseRequest {
            generation: 4,
            coordinates: Coordinates::JAKARTA,
        });

        assert_eq!(
            rx.recv().await,
            Some(GeocodeOutcome::Reverse {
                generation: 4,
                label: Some("Monas".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = GeocodeTasks::new(Arc::new(MockGeocoder::failing()), tx);

        tasks.search(SearchRequest {
            generation: 1,
            query: "Bandung".to_string(),
        });

        assert_eq!(
            rx.recv().await,
            Some(GeocodeOutcome::Search {
                generation: 1,
                result: None,
            })
        );
    }

    #[tokio::test]
    async fn test_abort_all_cancels_running_search() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let geocoder = MockGeocoder {
            delay: Some(Duration::from_millis(50)),
            ..MockGeocoder::failing()
        };
        let mut tasks = GeocodeTasks::new(Arc::new(geocoder), tx);

        tasks.search(SearchRequest {
            generation: 1,
            query: "Bandung".to_string(),
        });
        tokio::task::yield_now().await;
        tasks.abort_all();

        let outcome = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(outcome.is_err());
    }

    #[test]
    fn test_generations_are_shared() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let tasks = GeocodeTasks::new(Arc::new(MockGeocoder::failing()), tx);

        let first = tasks.generations().next();
        let second = tasks.generations().next();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_new_reverse_aborts_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let geocoder = MockGeocoder {
            delay: Some(Duration::from_millis(50)),
            ..MockGeocoder::with_label("Somewhere")
        };
        let mut tasks = GeocodeTasks::new(Arc::new(geocoder), tx);

        for generation in 1..=3 {
            tasks.reverse(ReverseRequest {
                generation,
                coordinates: Coordinates::JAKARTA,
            });
            tokio::task::yield_now().await;
        }

        let first = rx.recv().await.unwrap();
        assert!(matches!(first, GeocodeOutcome::Reverse { generation: 3, .. }));

        let extra = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(extra.is_err());
    }
}
