//! Location selection state machine.
//!
//! The picker tracks a request generation. Every map click, search start and
//! manual name edit draws a fresh one, and geocoding results are applied only
//! when they carry the current generation. A late reverse lookup can therefore
//! never overwrite a newer click or something the user typed.
//!
//! Generations come from a [`RequestGenerations`] counter shared by every
//! picker the app opens, so a reopened picker never reuses a number that a
//! lookup from an earlier session may still carry.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::map_viewport::{MapViewport, SEARCH_ZOOM};
use crate::domain::entities::{Coordinates, Location};
use crate::domain::ports::GeocodeMatch;

/// Forward lookup the caller should run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Generation the result must be tagged with.
    pub generation: u64,
    /// Trimmed query text.
    pub query: String,
}

/// Reverse lookup the caller should run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverseRequest {
    /// Generation the result must be tagged with.
    pub generation: u64,
    /// Clicked position.
    pub coordinates: Coordinates,
}

/// Monotonic source of lookup generations. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestGenerations(Arc<AtomicU64>);

impl RequestGenerations {
    /// Returns a generation never handed out before. The first is 1.
    #[must_use]
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// State of one picker session.
#[derive(Debug, Clone)]
pub struct LocationPicker {
    name: String,
    marker: Coordinates,
    viewport: MapViewport,
    selected: bool,
    searching: bool,
    generations: RequestGenerations,
    generation: u64,
}

impl LocationPicker {
    /// Opens the picker on `initial`. The marker starts at its coordinates,
    /// or at `default_center` when either is missing.
    ///
    /// The starting generation is 0, which no lookup ever carries.
    #[must_use]
    pub fn new(
        initial: &Location,
        default_center: Coordinates,
        zoom: u8,
        generations: RequestGenerations,
    ) -> Self {
        let marker = initial.coordinates().unwrap_or(default_center);
        Self {
            name: initial.name.clone(),
            marker,
            viewport: MapViewport::new(marker, zoom),
            selected: false,
            searching: false,
            generations,
            generation: 0,
        }
    }

    /// Current name text. Doubles as the search query.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marker position.
    #[must_use]
    pub const fn marker(&self) -> Coordinates {
        self.marker
    }

    /// Visible map window.
    #[must_use]
    pub const fn viewport(&self) -> &MapViewport {
        &self.viewport
    }

    /// Mutable map window for panning and zooming.
    pub fn viewport_mut(&mut self) -> &mut MapViewport {
        &mut self.viewport
    }

    /// Whether a click or successful search happened; gates saving.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether a forward lookup is in flight.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    /// Current request generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the name with user-typed text.
    ///
    /// Pending lookups become stale so they cannot overwrite the edit. The
    /// selection flag is left alone.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.generation = self.generations.next();
    }

    /// Starts a forward lookup for the current text.
    ///
    /// Returns `None` for blank text or while another search is running.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        let query = self.name.trim();
        if query.is_empty() || self.searching {
            return None;
        }

        let query = query.to_string();
        self.searching = true;
        self.generation = self.generations.next();
        debug!(generation = self.generation, query = %query, "Search started");
        Some(SearchRequest {
            generation: self.generation,
            query,
        })
    }

    /// Applies a forward lookup result. `None` means failure or no match and
    /// leaves the state untouched. Returns whether anything changed.
    pub fn apply_search(&mut self, generation: u64, result: Option<GeocodeMatch>) -> bool {
        self.searching = false;

        if generation != self.generation {
            debug!(generation, current = self.generation, "Dropping stale search result");
            return false;
        }

        let Some(found) = result else {
            return false;
        };

        self.name = found.label;
        self.marker = found.coordinates;
        self.viewport.fly_to(found.coordinates, SEARCH_ZOOM);
        self.selected = true;
        true
    }

    /// Places the marker at a clicked position with a provisional name and
    /// returns the reverse lookup to run.
    pub fn click(&mut self, coordinates: Coordinates) -> ReverseRequest {
        self.generation = self.generations.next();
        self.marker = coordinates;
        self.name = coordinates.provisional_name();
        self.selected = true;
        ReverseRequest {
            generation: self.generation,
            coordinates,
        }
    }

    /// Applies a reverse lookup result. A failed or empty lookup keeps the
    /// provisional name. Returns whether the name changed.
    pub fn apply_reverse(&mut self, generation: u64, label: Option<String>) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Dropping stale reverse result");
            return false;
        }

        match label.filter(|l| !l.trim().is_empty()) {
            Some(label) => {
                self.name = label;
                true
            }
            None => false,
        }
    }

    /// Emits the chosen location, or `None` while the save gate is closed.
    #[must_use]
    pub fn save(&self) -> Option<Location> {
        self.selected
            .then(|| Location::at(self.name.clone(), self.marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONAS: Coordinates = Coordinates {
        lat: -6.175_392,
        lng: 106.827_153,
    };

    fn open(initial: &Location) -> LocationPicker {
        LocationPicker::new(initial, Coordinates::JAKARTA, 5, RequestGenerations::default())
    }

    fn picker() -> LocationPicker {
        open(&Location::default())
    }

    #[test]
    fn test_initial_marker_uses_default_center() {
        let picker = open(&Location::named("Somewhere"));
        assert_eq!(picker.marker(), Coordinates::JAKARTA);
        assert_eq!(picker.name(), "Somewhere");
        assert!(!picker.is_selected());
    }

    #[test]
    fn test_initial_marker_uses_location() {
        let picker = open(&Location::at("Monas", MONAS));
        assert_eq!(picker.marker(), MONAS);
        assert_eq!(picker.viewport().center(), MONAS);
    }

    #[test]
    fn test_click_sets_provisional_name() {
        let mut picker = picker();
        let request = picker.click(Coordinates::new(-6.2, 106.816_666));

        assert_eq!(picker.name(), "Location (-6.2000, 106.8167)");
        assert_eq!(request.generation, picker.generation());
        assert!(picker.is_selected());
    }

    #[test]
    fn test_reverse_success_replaces_name() {
        let mut picker = picker();
        let request = picker.click(MONAS);

        assert!(picker.apply_reverse(request.generation, Some("Monas, Jakarta Pusat".to_string())));
        assert_eq!(picker.name(), "Monas, Jakarta Pusat");
    }

    #[test]
    fn test_reverse_failure_keeps_provisional_name() {
        let mut picker = picker();
        let request = picker.click(MONAS);

        assert!(!picker.apply_reverse(request.generation, None));
        assert_eq!(picker.name(), "Location (-6.1754, 106.8272)");
    }

    #[test]
    fn test_stale_reverse_is_dropped() {
        let mut picker = picker();
        let first = picker.click(MONAS);
        let second = picker.click(Coordinates::new(-6.9, 107.6));

        assert!(!picker.apply_reverse(first.generation, Some("Monas".to_string())));
        assert_eq!(picker.name(), "Location (-6.9000, 107.6000)");

        assert!(picker.apply_reverse(second.generation, Some("Bandung".to_string())));
        assert_eq!(picker.name(), "Bandung");
    }

    #[test]
    fn test_manual_edit_wins_over_late_reverse() {
        let mut picker = picker();
        let request = picker.click(MONAS);
        picker.set_name("Lapangan Monas, gate 3");

        assert!(!picker.apply_reverse(request.generation, Some("Monas".to_string())));
        assert_eq!(picker.name(), "Lapangan Monas, gate 3");
        assert!(picker.is_selected());
    }

    #[test]
    fn test_blank_search_is_noop() {
        let mut picker = picker();
        picker.set_name("   ");
        let generation = picker.generation();

        assert_eq!(picker.begin_search(), None);
        assert!(!picker.is_searching());
        assert_eq!(picker.generation(), generation);
    }

    #[test]
    fn test_search_success() {
        let mut picker = picker();
        picker.set_name(" Yogyakarta ");
        let request = picker.begin_search().unwrap();
        assert_eq!(request.query, "Yogyakarta");
        assert!(picker.is_searching());
        assert_eq!(picker.begin_search(), None);

        let target = Coordinates::new(-7.797_068, 110.370_529);
        let applied = picker.apply_search(
            request.generation,
            Some(GeocodeMatch {
                label: "Yogyakarta, Indonesia".to_string(),
                coordinates: target,
            }),
        );

        assert!(applied);
        assert!(!picker.is_searching());
        assert!(picker.is_selected());
        assert_eq!(picker.name(), "Yogyakarta, Indonesia");
        assert_eq!(picker.marker(), target);
        assert_eq!(picker.viewport().zoom(), SEARCH_ZOOM);
    }

    #[test]
    fn test_search_miss_leaves_state() {
        let mut picker = picker();
        picker.set_name("qwertyuiop");
        let request = picker.begin_search().unwrap();

        assert!(!picker.apply_search(request.generation, None));
        assert!(!picker.is_searching());
        assert!(!picker.is_selected());
        assert_eq!(picker.name(), "qwertyuiop");
        assert_eq!(picker.marker(), Coordinates::JAKARTA);
    }

    #[test]
    fn test_search_superseded_by_click() {
        let mut picker = picker();
        picker.set_name("Bandung");
        let request = picker.begin_search().unwrap();
        picker.click(MONAS);

        let applied = picker.apply_search(
            request.generation,
            Some(GeocodeMatch {
                label: "Bandung".to_string(),
                coordinates: Coordinates::new(-6.9, 107.6),
            }),
        );

        assert!(!applied);
        assert!(!picker.is_searching());
        assert_eq!(picker.marker(), MONAS);
    }

    #[test]
    fn test_generations_are_not_reused_across_sessions() {
        let generations = RequestGenerations::default();
        let bandung = Location::named("Bandung");
        let mut first = LocationPicker::new(&bandung, Coordinates::JAKARTA, 5, generations.clone());
        let search = first.begin_search().unwrap();

        let mut second = LocationPicker::new(&bandung, Coordinates::JAKARTA, 5, generations);
        let click = second.click(MONAS);
        assert!(click.generation > search.generation);

        let applied = second.apply_search(
            search.generation,
            Some(GeocodeMatch {
                label: "Bandung, Jawa Barat".to_string(),
                coordinates: Coordinates::new(-6.9, 107.6),
            }),
        );
        assert!(!applied);
        assert_eq!(second.marker(), MONAS);
    }

    #[test]
    fn test_save_gate() {
        let mut picker = open(&Location::at("Monas", MONAS));
        assert_eq!(picker.save(), None);

        picker.set_name("Edited");
        assert_eq!(picker.save(), None);

        picker.click(MONAS);
        picker.set_name("Monas North Gate");
        assert_eq!(picker.save(), Some(Location::at("Monas North Gate", MONAS)));
    }
}
