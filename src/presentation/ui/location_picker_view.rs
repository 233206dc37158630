//! Map overlay for choosing an activity location.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Widget,
        canvas::{Canvas, Map, MapResolution},
    },
};
use tracing::debug;

use super::utils::centered_rect;
use crate::application::services::{
    GeocodeOutcome, LocationPicker, RequestGenerations, ReverseRequest, SearchRequest,
    wrap_longitude,
};
use crate::domain::entities::{Coordinates, Location};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{StatusBar, TextInput};

/// Keyboard cursor moves this fraction of the visible span per arrow press.
const CURSOR_STEPS: f64 = 24.0;

/// What the caller should do after an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerAction {
    /// Nothing to do beyond redrawing.
    None,
    /// Run a forward lookup.
    Search(SearchRequest),
    /// Run a reverse lookup.
    Reverse(ReverseRequest),
    /// Close the overlay and use this location.
    Save(Location),
    /// Close the overlay without changes.
    Cancel,
}

/// Which part of the overlay receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerFocus {
    /// The name/search field.
    Name,
    /// The map and its cursor.
    Map,
}

/// Location picker overlay: a name field that doubles as the search box,
/// and a world map that takes mouse clicks or a keyboard cursor.
pub struct LocationPickerView {
    picker: LocationPicker,
    name_input: TextInput,
    focus: PickerFocus,
    cursor: Coordinates,
    notice: Option<&'static str>,
}

impl LocationPickerView {
    /// Opens the overlay on `initial`.
    #[must_use]
    pub fn new(
        initial: &Location,
        default_center: Coordinates,
        zoom: u8,
        generations: RequestGenerations,
    ) -> Self {
        let picker = LocationPicker::new(initial, default_center, zoom, generations);
        let mut name_input = TextInput::new(" Location name (Enter to search) ")
            .placeholder("e.g., Ancol Beach, Jakarta")
            .with_value(picker.name());
        name_input.set_focused(true);

        Self {
            cursor: picker.marker(),
            picker,
            name_input,
            focus: PickerFocus::Name,
            notice: None,
        }
    }

    /// Selection state.
    #[must_use]
    pub const fn picker(&self) -> &LocationPicker {
        &self.picker
    }

    /// Current focus.
    #[must_use]
    pub const fn focus(&self) -> PickerFocus {
        self.focus
    }

    /// Keyboard cursor position on the map.
    #[must_use]
    pub const fn cursor(&self) -> Coordinates {
        self.cursor
    }

    /// Text currently in the name field.
    #[must_use]
    pub fn name_text(&self) -> &str {
        self.name_input.value()
    }

    fn set_focus(&mut self, focus: PickerFocus) {
        self.focus = focus;
        self.name_input.set_focused(focus == PickerFocus::Name);
    }

    fn place_marker(&mut self, coordinates: Coordinates) -> PickerAction {
        self.cursor = coordinates;
        let request = self.picker.click(coordinates);
        self.name_input.set_value(self.picker.name());
        self.notice = None;
        debug!(coordinates = %coordinates, generation = request.generation, "Marker placed");
        PickerAction::Reverse(request)
    }

    fn try_save(&mut self) -> PickerAction {
        match self.picker.save() {
            Some(location) => PickerAction::Save(location),
            None => {
                self.notice = Some("Search or click the map before saving.");
                PickerAction::None
            }
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> PickerAction {
        if EventHandler::is_back_event(key) {
            return PickerAction::Cancel;
        }
        if EventHandler::is_save_event(key) {
            return self.try_save();
        }
        if EventHandler::is_focus_next(key) || EventHandler::is_focus_prev(key) {
            let next = match self.focus {
                PickerFocus::Name => PickerFocus::Map,
                PickerFocus::Map => PickerFocus::Name,
            };
            self.set_focus(next);
            return PickerAction::None;
        }

        match self.focus {
            PickerFocus::Name => self.handle_name_key(key),
            PickerFocus::Map => self.handle_map_key(key),
        }
    }

    fn handle_name_key(&mut self, key: &KeyEvent) -> PickerAction {
        if EventHandler::is_submit_event(key) {
            return self
                .picker
                .begin_search()
                .map_or(PickerAction::None, PickerAction::Search);
        }

        if self.name_input.handle_key(key) && self.name_input.value() != self.picker.name() {
            self.picker.set_name(self.name_input.value());
        }
        PickerAction::None
    }

    fn handle_map_key(&mut self, key: &KeyEvent) -> PickerAction {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let (lat_step, lng_step) = {
            let viewport = self.picker.viewport();
            (
                viewport.span_lat() / CURSOR_STEPS,
                viewport.span_lng() / CURSOR_STEPS,
            )
        };

        let delta = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some((1, 0)),
            KeyCode::Down | KeyCode::Char('j') => Some((-1, 0)),
            KeyCode::Left | KeyCode::Char('h') => Some((0, -1)),
            KeyCode::Right | KeyCode::Char('l') => Some((0, 1)),
            _ => None,
        };

        if let Some((dlat, dlng)) = delta {
            if shift {
                self.picker.viewport_mut().pan(dlat, dlng);
            } else {
                self.cursor = Coordinates::new(
                    (self.cursor.lat + f64::from(dlat) * lat_step).clamp(-90.0, 90.0),
                    wrap_longitude(self.cursor.lng + f64::from(dlng) * lng_step),
                );
                self.picker.viewport_mut().ensure_visible(self.cursor);
            }
            return PickerAction::None;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.place_marker(self.cursor),
            KeyCode::Char('+' | '=') => {
                self.picker.viewport_mut().zoom_in();
                self.picker.viewport_mut().ensure_visible(self.cursor);
                PickerAction::None
            }
            KeyCode::Char('-') => {
                self.picker.viewport_mut().zoom_out();
                PickerAction::None
            }
            KeyCode::Char('c') => {
                let marker = self.picker.marker();
                let zoom = self.picker.viewport().zoom();
                self.picker.viewport_mut().fly_to(marker, zoom);
                self.cursor = marker;
                PickerAction::None
            }
            KeyCode::Char('s') => self.try_save(),
            _ => PickerAction::None,
        }
    }

    /// Handles a mouse event. `body` is the area the overlay is drawn in.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent, body: Rect) -> PickerAction {
        let layout = PickerLayout::new(body);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.map_inner.contains((mouse.column, mouse.row).into()) {
                    self.set_focus(PickerFocus::Map);
                    let coordinates = self.picker.viewport().cell_to_coordinates(
                        mouse.column - layout.map_inner.x,
                        mouse.row - layout.map_inner.y,
                        layout.map_inner.width,
                        layout.map_inner.height,
                    );
                    return self.place_marker(coordinates);
                }
                if layout.name.contains((mouse.column, mouse.row).into()) {
                    self.set_focus(PickerFocus::Name);
                }
                PickerAction::None
            }
            MouseEventKind::ScrollUp if layout.map.contains((mouse.column, mouse.row).into()) => {
                self.picker.viewport_mut().zoom_in();
                PickerAction::None
            }
            MouseEventKind::ScrollDown if layout.map.contains((mouse.column, mouse.row).into()) => {
                self.picker.viewport_mut().zoom_out();
                PickerAction::None
            }
            _ => PickerAction::None,
        }
    }

    /// Applies a finished lookup. Returns whether anything visible changed.
    pub fn apply_outcome(&mut self, outcome: GeocodeOutcome) -> bool {
        let changed = match outcome {
            GeocodeOutcome::Search { generation, result } => {
                let changed = self.picker.apply_search(generation, result);
                if changed {
                    self.cursor = self.picker.marker();
                    self.notice = None;
                }
                changed
            }
            GeocodeOutcome::Reverse { generation, label } => {
                self.picker.apply_reverse(generation, label)
            }
        };

        if changed {
            self.name_input.set_value(self.picker.name());
        }
        changed
    }

    fn status_line(&self) -> Line<'_> {
        if self.picker.is_searching() {
            return Line::from(Span::styled(
                "Searching...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        if let Some(notice) = self.notice {
            return Line::from(Span::styled(notice, Style::default().fg(Color::Red)));
        }
        if self.picker.is_selected() {
            return Line::from(Span::styled(
                "Location selected!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(Span::styled(
            "Search by name or click the map to place the marker.",
            Style::default().fg(Color::DarkGray),
        ))
    }

    fn render_map(&self, area: Rect, buf: &mut Buffer) {
        let viewport = self.picker.viewport();
        let marker = self.picker.marker();
        let cursor = self.cursor;
        let show_cursor = self.focus == PickerFocus::Map;

        let border_style = if show_cursor {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(format!(" Map (zoom {}) ", viewport.zoom())),
            )
            .marker(Marker::Braille)
            .x_bounds(viewport.x_bounds())
            .y_bounds(viewport.y_bounds())
            .paint(move |ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: Color::DarkGray,
                });
                ctx.layer();
                if show_cursor {
                    ctx.print(
                        cursor.lng,
                        cursor.lat,
                        Span::styled("+", Style::default().fg(Color::Yellow)),
                    );
                }
                ctx.print(
                    marker.lng,
                    marker.lat,
                    Span::styled(
                        "●",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                );
            })
            .render(area, buf);
    }

    fn status_bar(&self) -> StatusBar {
        let save = if self.picker.is_selected() {
            "save"
        } else {
            "save (pick first)"
        };
        let bar = StatusBar::new().hint("Tab", "focus");
        let bar = match self.focus {
            PickerFocus::Name => bar.hint("Enter", "search"),
            PickerFocus::Map => bar
                .hint("←↑↓→", "cursor")
                .hint("Enter", "place")
                .hint("+/-", "zoom")
                .hint("Shift+←↑↓→", "pan"),
        };
        bar.hint("Ctrl+S", save).hint("Esc", "cancel")
    }
}

/// Overlay geometry, shared by drawing and mouse hit-testing.
struct PickerLayout {
    overlay: Rect,
    name: Rect,
    status: Rect,
    coordinates: Rect,
    map: Rect,
    map_inner: Rect,
    hints: Rect,
}

impl PickerLayout {
    fn new(body: Rect) -> Self {
        let overlay = centered_rect(90, 90, body);
        let inner = Block::default().borders(Borders::ALL).inner(overlay);
        let [name, status, coordinates, map, hints] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(inner);
        let map_inner = Block::default().borders(Borders::ALL).inner(map);

        Self {
            overlay,
            name,
            status,
            coordinates,
            map,
            map_inner,
            hints,
        }
    }
}

impl Widget for &LocationPickerView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = PickerLayout::new(area);

        Clear.render(layout.overlay, buf);
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Pick Location ")
            .render(layout.overlay, buf);

        (&self.name_input).render(layout.name, buf);
        Paragraph::new(self.status_line()).render(layout.status, buf);

        let marker = self.picker.marker();
        Paragraph::new(Line::from(vec![
            Span::styled("Coordinates: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{:.6}, {:.6}", marker.lat, marker.lng)),
        ]))
        .render(layout.coordinates, buf);

        self.render_map(layout.map, buf);
        (&self.status_bar()).render(layout.hints, buf);
    }
}
