//! Create and edit form for news posts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::load_state::LoadState;
use crate::application::dto::NewsForm;
use crate::domain::entities::{ActivityId, News, NewsId};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{StatusBar, TextInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsMode {
    Create(ActivityId),
    Edit(NewsId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsAction {
    None,
    Cancel,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Content,
    Images,
}

pub struct NewsFormScreen {
    mode: NewsMode,
    activity_id: Option<ActivityId>,
    load: LoadState<()>,
    title: TextInput,
    content: TextInput,
    images: TextInput,
    focus: Field,
    submitting: bool,
    error: Option<String>,
}

impl NewsFormScreen {
    #[must_use]
    pub fn new(mode: NewsMode) -> Self {
        let (activity_id, load) = match &mode {
            NewsMode::Create(activity_id) => (Some(activity_id.clone()), LoadState::Loaded(())),
            NewsMode::Edit(_) => (None, LoadState::Loading),
        };
        let mut screen = Self {
            mode,
            activity_id,
            load,
            title: TextInput::new(" Title ").placeholder("Enter news title"),
            content: TextInput::new(" Content ")
                .multiline()
                .placeholder("What happened?"),
            images: TextInput::new(" Image URLs (comma separated) ")
                .placeholder("https://example.com/image.jpg"),
            focus: Field::Title,
            submitting: false,
            error: None,
        };
        screen.set_focus(Field::Title);
        screen
    }

    #[must_use]
    pub const fn mode(&self) -> &NewsMode {
        &self.mode
    }

    /// Owning activity, known once the post is loaded in edit mode.
    #[must_use]
    pub const fn activity_id(&self) -> Option<&ActivityId> {
        self.activity_id.as_ref()
    }

    pub fn set_news(&mut self, news: &News) {
        let form = NewsForm::from_news(news);
        self.activity_id = Some(form.activity_id);
        self.title.set_value(form.title);
        self.content.set_value(form.content);
        self.images.set_value(form.images.join(", "));
        self.load = LoadState::Loaded(());
    }

    pub fn set_load_error(&mut self, message: impl Into<String>) {
        self.load = LoadState::Failed(message.into());
    }

    pub fn set_submitting(&mut self) {
        self.submitting = true;
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    /// Snapshot of the entered values, `None` until the owner is known.
    #[must_use]
    pub fn form(&self) -> Option<NewsForm> {
        let activity_id = self.activity_id.clone()?;
        Some(NewsForm {
            activity_id,
            title: self.title.value().to_string(),
            content: self.content.value().to_string(),
            images: self
                .images
                .value()
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        self.title.set_focused(field == Field::Title);
        self.content.set_focused(field == Field::Content);
        self.images.set_focused(field == Field::Images);
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> NewsAction {
        if self.submitting {
            return NewsAction::None;
        }
        if EventHandler::is_back_event(key) {
            return NewsAction::Cancel;
        }
        if self.load.loaded().is_none() {
            return NewsAction::None;
        }
        if EventHandler::is_save_event(key) {
            return NewsAction::Submit;
        }

        let next = match self.focus {
            Field::Title => Field::Content,
            Field::Content => Field::Images,
            Field::Images => Field::Title,
        };
        let prev = match self.focus {
            Field::Title => Field::Images,
            Field::Content => Field::Title,
            Field::Images => Field::Content,
        };
        if EventHandler::is_focus_next(key) {
            self.set_focus(next);
            return NewsAction::None;
        }
        if EventHandler::is_focus_prev(key) {
            self.set_focus(prev);
            return NewsAction::None;
        }

        match self.focus {
            Field::Title | Field::Images if EventHandler::is_submit_event(key) => {
                self.set_focus(next);
            }
            Field::Title => {
                self.title.handle_key(key);
            }
            Field::Content => {
                self.content.handle_key(key);
            }
            Field::Images => {
                if key.code == KeyCode::Char('d') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.images.clear();
                } else {
                    self.images.handle_key(key);
                }
            }
        }
        NewsAction::None
    }

    #[must_use]
    pub fn status_bar(&self) -> StatusBar {
        let label = match self.mode {
            NewsMode::Create(_) => "New news post",
            NewsMode::Edit(_) => "Edit news post",
        };
        StatusBar::info(label)
            .hint("Tab", "next field")
            .hint("Ctrl+S", "save")
            .hint("Esc", "cancel")
    }
}

impl Widget for &NewsFormScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.mode {
            NewsMode::Create(_) => " Add News ",
            NewsMode::Edit(_) => " Edit News ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        match &self.load {
            LoadState::Loading => {
                Paragraph::new("Loading news...")
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

        let [title_area, content_area, images_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .areas(inner);

        (&self.title).render(title_area, buf);
        (&self.content).render(content_area, buf);
        (&self.images).render(images_area, buf);

        let mut lines = vec![if self.submitting {
            Line::from(Span::styled(
                "Saving...",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(
                "Ctrl+S to save",
                Style::default().fg(Color::DarkGray),
            ))
        }];
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            )));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(footer_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut NewsFormScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_create_form_collects_fields() {
        let mut screen = NewsFormScreen::new(NewsMode::Create(ActivityId::new("a1")));
        type_text(&mut screen, "Day one");
        screen.handle_key(&key(KeyCode::Enter));
        type_text(&mut screen, "Went well");
        screen.handle_key(&key(KeyCode::Enter));
        type_text(&mut screen, "ok");
        screen.handle_key(&key(KeyCode::Tab));
        type_text(&mut screen, "https://img/a.jpg, , https://img/b.jpg");

        let form = screen.form().unwrap();
        assert_eq!(form.activity_id, ActivityId::new("a1"));
        assert_eq!(form.title, "Day one");
        assert_eq!(form.content, "Went well\nok");
        assert_eq!(form.images, vec!["https://img/a.jpg", "https://img/b.jpg"]);
    }

    #[test]
    fn test_edit_waits_for_load() {
        let mut screen = NewsFormScreen::new(NewsMode::Edit(NewsId::new("n1")));
        assert!(screen.form().is_none());
        assert_eq!(
            screen.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            NewsAction::None
        );

        let news: News = serde_json::from_value(serde_json::json!({
            "id": "n1",
            "activityId": "a1",
            "title": "Update",
            "content": "Body",
            "images": ["https://img/a.jpg"],
        }))
        .unwrap();
        screen.set_news(&news);

        let form = screen.form().unwrap();
        assert_eq!(form.activity_id, ActivityId::new("a1"));
        assert_eq!(form.images, vec!["https://img/a.jpg"]);
        assert_eq!(
            screen.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            NewsAction::Submit
        );
    }

    #[test]
    fn test_submitting_and_error() {
        let mut screen = NewsFormScreen::new(NewsMode::Create(ActivityId::new("a1")));
        screen.set_submitting();
        assert_eq!(screen.handle_key(&key(KeyCode::Esc)), NewsAction::None);
        screen.set_error("Failed to save news. Please try again.");
        assert_eq!(screen.handle_key(&key(KeyCode::Esc)), NewsAction::Cancel);
    }
}
