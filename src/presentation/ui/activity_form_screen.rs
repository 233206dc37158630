//! Create and edit form for activities.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::load_state::LoadState;
use super::location_picker_view::{LocationPickerView, PickerAction};
use super::utils::truncate_to_width;
use crate::application::dto::ActivityForm;
use crate::application::services::{
    GeocodeOutcome, RequestGenerations, ReverseRequest, SearchRequest,
};
use crate::domain::entities::{Activity, ActivityId, Category, Coordinates, Location};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{StatusBar, TextInput};

/// Whether the form makes a new record or changes an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ActivityId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    None,
    /// Leave without saving.
    Cancel,
    /// Send [`ActivityFormScreen::form`] to the backend.
    Submit,
    /// Picker wants a forward lookup.
    Search(SearchRequest),
    /// Picker wants a reverse lookup.
    Reverse(ReverseRequest),
    /// Picker closed; pending lookups can be dropped.
    PickerClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Category,
    Description,
    Location,
    Image,
    Target,
    Submit,
}

impl Field {
    const ORDER: [Self; 7] = [
        Self::Title,
        Self::Category,
        Self::Description,
        Self::Location,
        Self::Image,
        Self::Target,
        Self::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub struct ActivityFormScreen {
    mode: FormMode,
    load: LoadState<()>,
    title: TextInput,
    /// Category and image list; text fields live in their inputs.
    draft: ActivityForm,
    description: TextInput,
    location_name: TextInput,
    coordinates: Option<Coordinates>,
    image_url: TextInput,
    selected_image: usize,
    target: TextInput,
    focus: Field,
    submitting: bool,
    error: Option<String>,
    picker: Option<LocationPickerView>,
    picker_center: Coordinates,
    picker_zoom: u8,
    generations: RequestGenerations,
}

impl ActivityFormScreen {
    /// Creates an empty form. Edit forms start loading.
    ///
    /// `generations` is shared with every other picker the app opens.
    #[must_use]
    pub fn new(
        mode: FormMode,
        picker_center: Coordinates,
        picker_zoom: u8,
        generations: RequestGenerations,
    ) -> Self {
        let load = match mode {
            FormMode::Create => LoadState::Loaded(()),
            FormMode::Edit(_) => LoadState::Loading,
        };
        let mut screen = Self {
            mode,
            load,
            title: TextInput::new(" Title ").placeholder("Enter activity title"),
            draft: ActivityForm::default(),
            description: TextInput::new(" Description ")
                .multiline()
                .placeholder("Describe the activity..."),
            location_name: TextInput::new(" Location (Enter to pick on map) ")
                .placeholder("e.g., Ancol Beach, Jakarta"),
            coordinates: None,
            image_url: TextInput::new(" Image URL (Enter to add) ")
                .placeholder("https://example.com/image.jpg"),
            selected_image: 0,
            target: TextInput::new(" Target Money (Rp) ").placeholder("e.g., 10000000"),
            focus: Field::Title,
            submitting: false,
            error: None,
            picker: None,
            picker_center,
            picker_zoom,
            generations,
        };
        screen.set_focus(Field::Title);
        screen
    }

    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub const fn is_picker_open(&self) -> bool {
        self.picker.is_some()
    }

    #[must_use]
    pub const fn error(&self) -> Option<&String> {
        self.error.as_ref()
    }

    /// Pre-fills every field from the fetched record.
    pub fn set_activity(&mut self, activity: &Activity) {
        let form = ActivityForm::from_activity(activity);
        self.title.set_value(form.title.clone());
        self.description.set_value(form.description.clone());
        self.location_name.set_value(form.location.name.clone());
        self.coordinates = form.location.coordinates();
        self.target.set_value(form.target_money.clone());
        self.selected_image = 0;
        self.draft = form;
        self.load = LoadState::Loaded(());
    }

    pub fn set_load_error(&mut self, message: impl Into<String>) {
        self.load = LoadState::Failed(message.into());
    }

    pub fn set_submitting(&mut self) {
        self.submitting = true;
        self.error = None;
    }

    /// Shows a failed submit and re-enables the form.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    /// Snapshot of the entered values.
    #[must_use]
    pub fn form(&self) -> ActivityForm {
        let name = self.location_name.value().to_string();
        let location = match self.coordinates {
            Some(coordinates) => Location::at(name, coordinates),
            None => Location::named(name),
        };

        ActivityForm {
            title: self.title.value().to_string(),
            description: self.description.value().to_string(),
            location,
            target_money: self.target.value().to_string(),
            ..self.draft.clone()
        }
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        self.title.set_focused(field == Field::Title);
        self.description.set_focused(field == Field::Description);
        self.location_name.set_focused(field == Field::Location);
        self.image_url.set_focused(field == Field::Image);
        self.target.set_focused(field == Field::Target);
    }

    fn cycle_category(&mut self, forward: bool) {
        let options: Vec<Option<Category>> = std::iter::once(None)
            .chain(Category::ALL.into_iter().map(Some))
            .collect();
        let current = options.iter().position(|c| *c == self.draft.category).unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.draft.category = options[next];
    }

    fn open_picker(&mut self) {
        let initial = self.form().location;
        self.picker = Some(LocationPickerView::new(
            &initial,
            self.picker_center,
            self.picker_zoom,
            self.generations.clone(),
        ));
    }

    fn picker_action(&mut self, action: PickerAction) -> FormAction {
        match action {
            PickerAction::None => FormAction::None,
            PickerAction::Search(request) => FormAction::Search(request),
            PickerAction::Reverse(request) => FormAction::Reverse(request),
            PickerAction::Save(location) => {
                self.location_name.set_value(location.name.clone());
                self.coordinates = location.coordinates();
                self.picker = None;
                FormAction::PickerClosed
            }
            PickerAction::Cancel => {
                self.picker = None;
                FormAction::PickerClosed
            }
        }
    }

    /// Forwards a lookup result to the open picker.
    pub fn apply_geocode(&mut self, outcome: GeocodeOutcome) -> bool {
        self.picker
            .as_mut()
            .is_some_and(|picker| picker.apply_outcome(outcome))
    }

    /// Handles a mouse event; only the picker reacts to the mouse.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent, body: Rect) -> FormAction {
        let Some(picker) = self.picker.as_mut() else {
            return FormAction::None;
        };
        let action = picker.handle_mouse(mouse, body);
        self.picker_action(action)
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> FormAction {
        if let Some(picker) = self.picker.as_mut() {
            let action = picker.handle_key(key);
            return self.picker_action(action);
        }

        if self.submitting {
            return FormAction::None;
        }

        if EventHandler::is_back_event(key) {
            return FormAction::Cancel;
        }

        match self.load {
            LoadState::Loaded(()) => {}
            LoadState::Loading => return FormAction::None,
            LoadState::Failed(_) => {
                return if EventHandler::is_quit_event(key) {
                    FormAction::Cancel
                } else {
                    FormAction::None
                };
            }
        }

        if EventHandler::is_save_event(key) {
            return FormAction::Submit;
        }
        if EventHandler::is_focus_next(key) {
            self.set_focus(self.focus.next());
            return FormAction::None;
        }
        if EventHandler::is_focus_prev(key) {
            self.set_focus(self.focus.prev());
            return FormAction::None;
        }

        match self.focus {
            Field::Title => {
                self.title.handle_key(key);
            }
            Field::Description => {
                self.description.handle_key(key);
            }
            Field::Target => {
                self.target.handle_key(key);
            }
            Field::Category => match key.code {
                KeyCode::Left => self.cycle_category(false),
                KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => self.cycle_category(true),
                _ => {}
            },
            Field::Location => {
                if EventHandler::is_submit_event(key) {
                    self.open_picker();
                } else {
                    self.location_name.handle_key(key);
                }
            }
            Field::Image => self.handle_image_key(key),
            Field::Submit => {
                if EventHandler::is_submit_event(key) {
                    return FormAction::Submit;
                }
            }
        }

        FormAction::None
    }

    fn handle_image_key(&mut self, key: &KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => {
                if self.draft.add_image(self.image_url.value()) {
                    self.selected_image = self.draft.images.len() - 1;
                    self.image_url.clear();
                }
            }
            KeyCode::Up => self.selected_image = self.selected_image.saturating_sub(1),
            KeyCode::Down => {
                if self.selected_image + 1 < self.draft.images.len() {
                    self.selected_image += 1;
                }
            }
            KeyCode::Char('d') if ctrl => {
                if self.draft.remove_image(self.selected_image).is_some() {
                    self.selected_image = self
                        .selected_image
                        .min(self.draft.images.len().saturating_sub(1));
                }
            }
            _ => {
                self.image_url.handle_key(key);
            }
        }
    }

    #[must_use]
    pub fn status_bar(&self) -> StatusBar {
        if self.picker.is_some() {
            return StatusBar::info("Pick location")
                .hint("Enter", "search / place")
                .hint("Tab", "name / map")
                .hint("Ctrl+S", "use location")
                .hint("Esc", "close");
        }
        let bar = StatusBar::info(match self.mode {
            FormMode::Create => "New activity",
            FormMode::Edit(_) => "Edit activity",
        })
        .hint("Tab", "next field");
        let bar = match self.focus {
            Field::Category => bar.hint("←→", "choose"),
            Field::Location => bar.hint("Enter", "pick on map"),
            Field::Image => bar.hint("Enter", "add").hint("Ctrl+D", "remove"),
            _ => bar,
        };
        bar.hint("Ctrl+S", "save").hint("Esc", "cancel")
    }

    fn submit_label(&self) -> &'static str {
        match (&self.mode, self.submitting) {
            (FormMode::Create, true) => "Creating...",
            (FormMode::Create, false) => "Create Activity",
            (FormMode::Edit(_), true) => "Updating...",
            (FormMode::Edit(_), false) => "Update Activity",
        }
    }

    fn render_category(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.focus == Field::Category;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }))
            .title(" Category ");

        let line = match self.draft.category {
            Some(category) => Line::from(vec![
                Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
                Span::styled(category.label(), Style::default().fg(Color::Magenta)),
                Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
            ]),
            None => Line::from(Span::styled(
                "Select category",
                Style::default().fg(Color::DarkGray),
            )),
        };
        Paragraph::new(line).block(block).render(area, buf);
    }

    fn render_images(&self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(area.width.saturating_sub(4));
        let lines: Vec<Line> = if self.draft.images.is_empty() {
            vec![Line::from(Span::styled(
                "  No images added",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.draft.images
                .iter()
                .enumerate()
                .map(|(i, url)| {
                    let selected = self.focus == Field::Image && i == self.selected_image;
                    let style = if selected {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::Blue)
                    };
                    Line::from(vec![
                        Span::styled(if selected { "▌ " } else { "  " }, style),
                        Span::styled(truncate_to_width(url, width), style),
                    ])
                })
                .collect()
        };

        let first = self
            .selected_image
            .saturating_sub(usize::from(area.height.saturating_sub(1)));
        Paragraph::new(lines)
            .scroll((u16::try_from(first).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.focus == Field::Submit;
        let button_style = if self.submitting {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC)
        } else if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let mut lines = vec![Line::from(Span::styled(
            format!(" {} ", self.submit_label()),
            button_style,
        ))];
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            )));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl Widget for &ActivityFormScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.mode {
            FormMode::Create => " Create New Activity ",
            FormMode::Edit(_) => " Edit Activity ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        match &self.load {
            LoadState::Loading => {
                Paragraph::new("Loading activity...")
                    .style(Style::default().fg(Color::Yellow))
                    .render(inner, buf);
                return;
            }
            LoadState::Failed(error) => {
                Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
                    .wrap(Wrap { trim: true })
                    .render(inner, buf);
                return;
            }
            LoadState::Loaded(()) => {}
        }

        let image_rows = u16::try_from(self.draft.images.len().clamp(1, 4)).unwrap_or(4);
        let [
            title_area,
            category_area,
            description_area,
            location_area,
            image_area,
            images_area,
            target_area,
            footer_area,
        ] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(image_rows),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .areas(inner);

        (&self.title).render(title_area, buf);
        self.render_category(category_area, buf);
        (&self.description).render(description_area, buf);
        (&self.location_name).render(location_area, buf);
        (&self.image_url).render(image_area, buf);
        self.render_images(images_area, buf);
        (&self.target).render(target_area, buf);
        self.render_footer(footer_area, buf);

        if let Some(picker) = &self.picker {
            picker.render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::GeocodeMatch;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(screen: &mut ActivityFormScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(&key(KeyCode::Char(c)));
        }
    }

    fn tab(screen: &mut ActivityFormScreen, times: usize) {
        for _ in 0..times {
            screen.handle_key(&key(KeyCode::Tab));
        }
    }

    fn create() -> ActivityFormScreen {
        ActivityFormScreen::new(
            FormMode::Create,
            Coordinates::JAKARTA,
            10,
            RequestGenerations::default(),
        )
    }

    fn render_text(screen: &ActivityFormScreen) -> String {
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_fills_form_fields() {
        let mut screen = create();
        type_text(&mut screen, "Beach Cleanup");
        tab(&mut screen, 1);
        screen.handle_key(&key(KeyCode::Right));
        tab(&mut screen, 1);
        type_text(&mut screen, "Bring gloves");
        tab(&mut screen, 1);
        type_text(&mut screen, "Ancol");
        tab(&mut screen, 2);
        type_text(&mut screen, "5000000");

        let form = screen.form();
        assert_eq!(form.title, "Beach Cleanup");
        assert_eq!(form.category, Some(Category::BantuanSosial));
        assert_eq!(form.description, "Bring gloves");
        assert_eq!(form.location.name, "Ancol");
        assert_eq!(form.location.lat, None);
        assert_eq!(form.target_money, "5000000");
    }

    #[test]
    fn test_category_cycles_through_unset() {
        let mut screen = create();
        tab(&mut screen, 1);
        screen.handle_key(&key(KeyCode::Left));
        assert_eq!(screen.form().category, Some(Category::Bencana));
        screen.handle_key(&key(KeyCode::Right));
        assert_eq!(screen.form().category, None);
    }

    #[test]
    fn test_image_list_add_and_remove() {
        let mut screen = create();
        tab(&mut screen, 4);
        screen.handle_key(&key(KeyCode::Enter));
        assert!(screen.form().images.is_empty());

        type_text(&mut screen, " https://img/a.jpg ");
        screen.handle_key(&key(KeyCode::Enter));
        type_text(&mut screen, "https://img/b.jpg");
        screen.handle_key(&key(KeyCode::Enter));
        assert_eq!(screen.form().images, vec!["https://img/a.jpg", "https://img/b.jpg"]);

        screen.handle_key(&key(KeyCode::Up));
        screen.handle_key(&ctrl('d'));
        assert_eq!(screen.form().images, vec!["https://img/b.jpg"]);
    }

    #[test]
    fn test_submit_from_button_and_shortcut() {
        let mut screen = create();
        assert_eq!(screen.handle_key(&ctrl('s')), FormAction::Submit);
        tab(&mut screen, 6);
        assert_eq!(screen.handle_key(&key(KeyCode::Enter)), FormAction::Submit);
        assert_eq!(screen.handle_key(&key(KeyCode::Esc)), FormAction::Cancel);
    }

    #[test]
    fn test_submitting_blocks_input_and_error_reenables() {
        let mut screen = create();
        screen.set_submitting();
        assert!(render_text(&screen).contains("Creating..."));
        assert_eq!(screen.handle_key(&ctrl('s')), FormAction::None);

        screen.set_error("Failed to create activity. Please try again.");
        assert_eq!(screen.handle_key(&ctrl('s')), FormAction::Submit);
        assert!(render_text(&screen).contains("Failed to create activity."));
    }

    #[test]
    fn test_picker_opens_and_save_fills_location() {
        let mut screen = create();
        tab(&mut screen, 3);
        screen.handle_key(&key(KeyCode::Enter));
        assert!(screen.is_picker_open());

        // Focus the map and place the marker at the cursor.
        screen.handle_key(&key(KeyCode::Tab));
        let action = screen.handle_key(&key(KeyCode::Enter));
        let FormAction::Reverse(request) = action else {
            panic!("expected reverse lookup, got {action:?}");
        };
        screen.apply_geocode(GeocodeOutcome::Reverse {
            generation: request.generation,
            label: Some("Monas, Jakarta".to_string()),
        });

        assert_eq!(screen.handle_key(&ctrl('s')), FormAction::PickerClosed);
        assert!(!screen.is_picker_open());
        let location = screen.form().location;
        assert_eq!(location.name, "Monas, Jakarta");
        assert!(location.lat.is_some());
    }

    #[test]
    fn test_picker_cancel_keeps_location() {
        let mut screen = create();
        tab(&mut screen, 3);
        type_text(&mut screen, "Ancol");
        screen.handle_key(&key(KeyCode::Enter));
        assert_eq!(screen.handle_key(&key(KeyCode::Esc)), FormAction::PickerClosed);
        assert_eq!(screen.form().location.name, "Ancol");
    }

    #[test]
    fn test_search_from_closed_picker_cannot_replace_newer_click() {
        let mut screen = create();
        tab(&mut screen, 3);
        type_text(&mut screen, "Bandung");
        screen.handle_key(&key(KeyCode::Enter));

        let action = screen.handle_key(&key(KeyCode::Enter));
        let FormAction::Search(old) = action else {
            panic!("expected search, got {action:?}");
        };
        assert_eq!(screen.handle_key(&key(KeyCode::Esc)), FormAction::PickerClosed);

        screen.handle_key(&key(KeyCode::Enter));
        assert!(screen.is_picker_open());
        screen.handle_key(&key(KeyCode::Tab));
        let action = screen.handle_key(&key(KeyCode::Enter));
        let FormAction::Reverse(click) = action else {
            panic!("expected reverse lookup, got {action:?}");
        };
        assert_ne!(click.generation, old.generation);

        let applied = screen.apply_geocode(GeocodeOutcome::Search {
            generation: old.generation,
            result: Some(GeocodeMatch {
                label: "Bandung, Jawa Barat".to_string(),
                coordinates: Coordinates::new(-6.9, 107.6),
            }),
        });
        assert!(!applied);

        assert_eq!(screen.handle_key(&ctrl('s')), FormAction::PickerClosed);
        let location = screen.form().location;
        assert_ne!(location.name, "Bandung, Jawa Barat");
        assert_eq!(location.coordinates(), Some(click.coordinates));
    }

    #[test]
    fn test_edit_prefills_from_activity() {
        let activity: Activity = serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "title": "Food Drive",
            "description": "Collect rice.",
            "category": "bencana",
            "location": {"name": "Bogor", "lat": -6.6, "lng": 106.8},
            "imageUrl": "https://img/c.jpg",
            "targetMoney": 750000,
        }))
        .unwrap();

        let mut screen = ActivityFormScreen::new(
            FormMode::Edit(ActivityId::new("a1")),
            Coordinates::JAKARTA,
            10,
            RequestGenerations::default(),
        );
        assert!(render_text(&screen).contains("Loading activity..."));
        assert_eq!(screen.handle_key(&ctrl('s')), FormAction::None);

        screen.set_activity(&activity);
        let form = screen.form();
        assert_eq!(form.title, "Food Drive");
        assert_eq!(form.category, Some(Category::Bencana));
        assert_eq!(form.location.lat, Some(-6.6));
        assert_eq!(form.images, vec!["https://img/c.jpg"]);
        assert_eq!(form.target_money, "750000");
        assert!(render_text(&screen).contains("Update Activity"));
    }
}
