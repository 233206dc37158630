//! Visible window onto the world map.
//!
//! The window is an equirectangular slice of the globe: at zoom `z` it spans
//! `360 / 2^z` degrees of longitude and `180 / 2^z` degrees of latitude.

use crate::domain::entities::Coordinates;

/// Zoom the map jumps to after a successful search.
pub const SEARCH_ZOOM: u8 = 13;
/// Deepest zoom level.
pub const MAX_ZOOM: u8 = 13;

const PAN_DIVISOR: f64 = 8.0;

/// Center plus zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    center: Coordinates,
    zoom: u8,
}

impl MapViewport {
    /// Creates a viewport, clamping zoom and latitude.
    #[must_use]
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        let mut viewport = Self {
            center,
            zoom: zoom.min(MAX_ZOOM),
        };
        viewport.normalize();
        viewport
    }

    /// Returns the center.
    #[must_use]
    pub const fn center(&self) -> Coordinates {
        self.center
    }

    /// Returns the zoom level.
    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Degrees of longitude visible.
    #[must_use]
    pub fn span_lng(&self) -> f64 {
        360.0 / f64::from(1u32 << self.zoom)
    }

    /// Degrees of latitude visible.
    #[must_use]
    pub fn span_lat(&self) -> f64 {
        180.0 / f64::from(1u32 << self.zoom)
    }

    /// Longitude range `[west, east]`, the canvas x bounds.
    #[must_use]
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.span_lng() / 2.0;
        [self.center.lng - half, self.center.lng + half]
    }

    /// Latitude range `[south, north]`, the canvas y bounds.
    #[must_use]
    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.span_lat() / 2.0;
        [self.center.lat - half, self.center.lat + half]
    }

    /// Maps a terminal cell inside a `width` x `height` map area to the
    /// coordinate at the middle of that cell.
    #[must_use]
    pub fn cell_to_coordinates(&self, col: u16, row: u16, width: u16, height: u16) -> Coordinates {
        let [west, _] = self.x_bounds();
        let [_, north] = self.y_bounds();
        let width = f64::from(width.max(1));
        let height = f64::from(height.max(1));

        let lng = west + (f64::from(col) + 0.5) / width * self.span_lng();
        let lat = north - (f64::from(row) + 0.5) / height * self.span_lat();

        Coordinates::new(lat.clamp(-90.0, 90.0), wrap_longitude(lng))
    }

    /// Inverse of [`Self::cell_to_coordinates`]; `None` when off-screen.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn coordinates_to_cell(
        &self,
        coordinates: Coordinates,
        width: u16,
        height: u16,
    ) -> Option<(u16, u16)> {
        let [west, east] = self.x_bounds();
        let [south, north] = self.y_bounds();
        if coordinates.lng < west
            || coordinates.lng >= east
            || coordinates.lat <= south
            || coordinates.lat > north
        {
            return None;
        }

        let col = ((coordinates.lng - west) / self.span_lng() * f64::from(width)).floor();
        let row = ((north - coordinates.lat) / self.span_lat() * f64::from(height)).floor();
        Some((
            (col as u16).min(width.saturating_sub(1)),
            (row as u16).min(height.saturating_sub(1)),
        ))
    }

    /// Moves the center by a fraction of the visible span per step.
    pub fn pan(&mut self, lat_steps: i32, lng_steps: i32) {
        self.center.lat += f64::from(lat_steps) * self.span_lat() / PAN_DIVISOR;
        self.center.lng += f64::from(lng_steps) * self.span_lng() / PAN_DIVISOR;
        self.normalize();
    }

    /// Zooms in one level.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    /// Zooms out one level.
    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1);
        self.normalize();
    }

    /// Recenters on `center` at `zoom`.
    pub fn fly_to(&mut self, center: Coordinates, zoom: u8) {
        self.center = center;
        self.zoom = zoom.min(MAX_ZOOM);
        self.normalize();
    }

    /// Pans just enough to bring `coordinates` into view.
    pub fn ensure_visible(&mut self, coordinates: Coordinates) {
        let [west, east] = self.x_bounds();
        let [south, north] = self.y_bounds();
        if coordinates.lng < west || coordinates.lng >= east {
            self.center.lng = coordinates.lng;
        }
        if coordinates.lat <= south || coordinates.lat > north {
            self.center.lat = coordinates.lat;
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        self.center.lng = wrap_longitude(self.center.lng);
        self.center.lat = self.center.lat.clamp(-90.0, 90.0);
    }
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::new(Coordinates::JAKARTA, 5)
    }
}

/// Wraps a longitude into `[-180, 180)`. In-range values pass through
/// untouched so exact coordinates survive.
#[must_use]
pub fn wrap_longitude(lng: f64) -> f64 {
    if (-180.0..180.0).contains(&lng) {
        return lng;
    }
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test_case(0, 360.0, 180.0 ; "world")]
    #[test_case(1, 180.0, 90.0 ; "half")]
    #[test_case(3, 45.0, 22.5 ; "eighth")]
    fn test_span(zoom: u8, lng: f64, lat: f64) {
        let viewport = MapViewport::new(Coordinates::new(0.0, 0.0), zoom);
        assert!(approx(viewport.span_lng(), lng));
        assert!(approx(viewport.span_lat(), lat));
    }

    #[test_case(110.3695, 110.3695 ; "in range is exact")]
    #[test_case(-180.0, -180.0 ; "lower bound")]
    #[test_case(180.0, -180.0 ; "upper bound wraps")]
    #[test_case(190.0, -170.0 ; "east overflow")]
    #[test_case(-200.0, 160.0 ; "west overflow")]
    fn test_wrap_longitude(lng: f64, expected: f64) {
        let wrapped = wrap_longitude(lng);
        assert!(approx(wrapped, expected), "{lng} wrapped to {wrapped}");
    }

    #[test]
    fn test_in_range_longitude_is_not_rounded() {
        assert_eq!(wrap_longitude(106.827_153).to_bits(), 106.827_153_f64.to_bits());
    }

    #[test]
    fn test_cell_mapping_center() {
        let viewport = MapViewport::new(Coordinates::new(0.0, 0.0), 0);
        let top_left = viewport.cell_to_coordinates(0, 0, 360, 180);
        assert!(approx(top_left.lng, -179.5));
        assert!(approx(top_left.lat, 89.5));

        let cell = viewport.coordinates_to_cell(top_left, 360, 180);
        assert_eq!(cell, Some((0, 0)));
    }

    #[test]
    fn test_offscreen_coordinates() {
        let viewport = MapViewport::new(Coordinates::JAKARTA, 6);
        assert_eq!(
            viewport.coordinates_to_cell(Coordinates::new(51.5, -0.12), 80, 24),
            None
        );
        assert!(
            viewport
                .coordinates_to_cell(Coordinates::JAKARTA, 80, 24)
                .is_some()
        );
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = MapViewport::new(Coordinates::JAKARTA, 40);
        assert_eq!(viewport.zoom(), MAX_ZOOM);
        viewport.zoom_in();
        assert_eq!(viewport.zoom(), MAX_ZOOM);

        let mut viewport = MapViewport::new(Coordinates::JAKARTA, 0);
        viewport.zoom_out();
        assert_eq!(viewport.zoom(), 0);
    }

    #[test]
    fn test_pan_wraps_longitude() {
        let mut viewport = MapViewport::new(Coordinates::new(0.0, 170.0), 0);
        viewport.pan(0, 1);
        assert!(approx(viewport.center().lng, -145.0));

        viewport.pan(10, 0);
        assert!(approx(viewport.center().lat, 90.0));
    }

    #[test]
    fn test_fly_to() {
        let mut viewport = MapViewport::default();
        let target = Coordinates::new(-7.7956, 110.3695);
        viewport.fly_to(target, SEARCH_ZOOM);
        assert_eq!(viewport.center(), target);
        assert_eq!(viewport.zoom(), 13);
    }
}
