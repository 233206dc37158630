//! Activity list.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::load_state::LoadState;
use super::utils::{format_short_date, truncate_to_width};
use crate::domain::entities::{Activity, ActivityId};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::StatusBar;

/// Result of a key press on the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeAction {
    /// Nothing to do.
    None,
    /// Leave the application.
    Quit,
    /// Show an activity.
    Open(ActivityId),
    /// Open the create form.
    Create,
    /// Go to the login screen.
    Login,
    /// Clear the session.
    Logout,
    /// Fetch the list again.
    Reload,
}

/// Home screen: hero banner plus the activity list.
pub struct HomeScreen {
    activities: LoadState<Vec<Activity>>,
    selected: usize,
    signed_in: bool,
    excerpt_length: usize,
}

impl HomeScreen {
    /// Creates the screen in its loading state.
    #[must_use]
    pub fn new(signed_in: bool, excerpt_length: usize) -> Self {
        Self {
            activities: LoadState::Loading,
            selected: 0,
            signed_in,
            excerpt_length,
        }
    }

    /// Updates the session-dependent actions.
    pub fn set_signed_in(&mut self, signed_in: bool) {
        self.signed_in = signed_in;
    }

    /// Marks the list as being fetched.
    pub fn set_loading(&mut self) {
        self.activities = LoadState::Loading;
    }

    /// Shows fetched activities, keeping the selection in range.
    pub fn set_activities(&mut self, activities: Vec<Activity>) {
        self.selected = self.selected.min(activities.len().saturating_sub(1));
        self.activities = LoadState::Loaded(activities);
    }

    /// Shows a load failure.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.activities = LoadState::Failed(message.into());
    }

    /// Returns the highlighted activity.
    #[must_use]
    pub fn selected_activity(&self) -> Option<&Activity> {
        self.activities
            .loaded()
            .and_then(|list| list.get(self.selected))
    }

    fn len(&self) -> usize {
        self.activities.loaded().map_or(0, Vec::len)
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: &KeyEvent) -> HomeAction {
        if EventHandler::is_quit_event(key) {
            return HomeAction::Quit;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = self.len().saturating_sub(1),
            KeyCode::Enter => {
                if let Some(activity) = self.selected_activity() {
                    return HomeAction::Open(activity.id.clone());
                }
            }
            KeyCode::Char('n' | 'a') if self.signed_in => return HomeAction::Create,
            KeyCode::Char('l') => {
                return if self.signed_in {
                    HomeAction::Logout
                } else {
                    HomeAction::Login
                };
            }
            KeyCode::Char('r') if !self.activities.is_loading() => return HomeAction::Reload,
            _ => {}
        }

        HomeAction::None
    }

    /// Key hints for the bottom bar.
    #[must_use]
    pub fn status_bar(&self) -> StatusBar {
        let bar = StatusBar::info("Activities")
            .hint("↑↓", "select")
            .hint("Enter", "view details");
        let bar = if self.signed_in {
            bar.hint("n", "add activity").hint("l", "logout")
        } else {
            bar.hint("l", "login as admin")
        };
        bar.hint("r", "reload").hint("q", "quit")
    }

    fn activity_item(&self, activity: &Activity, width: usize) -> ListItem<'_> {
        let dim = Style::default().fg(Color::Gray);
        let mut title = vec![Span::styled(
            truncate_to_width(&activity.title, width.saturating_sub(20)),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !activity.category.is_empty() {
            title.push(Span::styled(
                format!("  [{}]", activity.category_label()),
                Style::default().fg(Color::Magenta),
            ));
        }

        let mut meta = vec![Span::styled(activity.location_name().to_string(), dim)];
        if let Some(date) = activity.date.as_deref() {
            meta.push(Span::styled(format!("  ·  {}", format_short_date(date)), dim));
        }
        meta.push(Span::styled(
            format!("  ·  {} volunteers", activity.volunteer_count()),
            dim,
        ));

        ListItem::new(vec![
            Line::from(title),
            Line::from(truncate_to_width(
                &activity.excerpt(self.excerpt_length),
                width,
            )),
            Line::from(meta),
            Line::default(),
        ])
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .title(" Activities ")
            .border_style(Style::default().fg(Color::DarkGray));

        let message = match &self.activities {
            LoadState::Loading => Some(Paragraph::new("Loading activities...").style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoadState::Failed(error) => Some(
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            ),
            LoadState::Loaded(list) if list.is_empty() => {
                let hint = if self.signed_in {
                    "Create your first activity to get started!"
                } else {
                    "Check back later for upcoming activities"
                };
                Some(Paragraph::new(vec![
                    Line::from(Span::styled(
                        "No activities yet",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
                ]))
            }
            LoadState::Loaded(_) => None,
        };

        if let Some(paragraph) = message {
            paragraph
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        let Some(activities) = self.activities.loaded() else {
            return;
        };
        let width = usize::from(block.inner(area).width.saturating_sub(2));
        let items: Vec<ListItem> = activities
            .iter()
            .map(|activity| self.activity_item(activity, width))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol("▌ ")
            .highlight_style(Style::default().fg(Color::Cyan));
        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

impl Widget for &HomeScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [hero, list] = Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "Make a Difference Today",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Join our community of volunteers and help create positive change",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center)
        .render(hero, buf);

        self.render_list(list, buf);
    }
}
