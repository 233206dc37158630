//! Login screen.

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::application::dto::LoginRequest;
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{StatusBar, TextInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Input,
    Submitting,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Email,
    Password,
}

/// Login screen UI.
pub struct LoginScreen {
    email_input: TextInput,
    password_input: TextInput,
    focus: LoginField,
    state: LoginState,
}

impl LoginScreen {
    /// Creates new login screen.
    #[must_use]
    pub fn new() -> Self {
        let mut email_input = TextInput::new(" Email ").placeholder("you@example.com");
        email_input.set_focused(true);
        let password_input = TextInput::new(" Password ")
            .password()
            .placeholder("••••••••");

        Self {
            email_input,
            password_input,
            focus: LoginField::Email,
            state: LoginState::Input,
        }
    }

    /// Returns current state.
    #[must_use]
    pub const fn state(&self) -> &LoginState {
        &self.state
    }

    /// Builds the request from the entered credentials.
    #[must_use]
    pub fn request(&self) -> LoginRequest {
        LoginRequest::new(self.email_input.value(), self.password_input.value())
    }

    /// Sets submitting state.
    pub fn set_submitting(&mut self) {
        self.state = LoginState::Submitting;
    }

    /// Sets error state. The password is cleared, the email kept.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error(message.into());
        self.password_input.clear();
        self.set_focus(LoginField::Password);
    }

    fn set_focus(&mut self, field: LoginField) {
        self.focus = field;
        self.email_input.set_focused(field == LoginField::Email);
        self.password_input.set_focused(field == LoginField::Password);
    }

    fn toggle_focus(&mut self) {
        let next = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
        self.set_focus(next);
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: &KeyEvent) -> LoginAction {
        if self.state == LoginState::Submitting {
            return LoginAction::None;
        }

        if EventHandler::is_back_event(key) {
            return LoginAction::Back;
        }

        if EventHandler::is_focus_next(key) || EventHandler::is_focus_prev(key) {
            self.toggle_focus();
            return LoginAction::None;
        }

        if EventHandler::is_submit_event(key) {
            if self.focus == LoginField::Email && self.password_input.value().is_empty() {
                self.set_focus(LoginField::Password);
                return LoginAction::None;
            }
            return LoginAction::Submit;
        }

        let input = match self.focus {
            LoginField::Email => &mut self.email_input,
            LoginField::Password => &mut self.password_input,
        };
        if input.handle_key(key) && matches!(self.state, LoginState::Error(_)) {
            self.state = LoginState::Input;
        }

        LoginAction::None
    }

    /// Key hints for the bottom bar.
    #[must_use]
    pub fn status_bar(&self) -> StatusBar {
        StatusBar::info("Login")
            .hint("Tab", "next field")
            .hint("Enter", "sign in")
            .hint("Esc", "back")
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(14),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(56),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Admin Login ");

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let areas = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas::<6>(inner);

        Paragraph::new("Sign in to manage activities")
            .style(Style::default().fg(Color::White))
            .render(areas[0], buf);

        (&self.email_input).render(areas[2], buf);
        (&self.password_input).render(areas[3], buf);

        let status = match &self.state {
            LoginState::Input => Line::from(Span::styled(
                "Sign in",
                Style::default().fg(Color::DarkGray),
            )),
            LoginState::Submitting => Line::from(Span::styled(
                "Signing in...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoginState::Error(msg) => Line::from(Span::styled(
                msg.as_str(),
                Style::default().fg(Color::Red),
            )),
        };
        Paragraph::new(status)
            .wrap(Wrap { trim: true })
            .render(areas[5], buf);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_initial_state() {
        let screen = LoginScreen::new();
        assert_eq!(screen.state(), &LoginState::Input);
        assert!(screen.request().email.is_empty());
    }

    #[test]
    fn test_typing_into_both_fields() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "admin@care.id");
        screen.handle_key(&key(KeyCode::Tab));
        type_text(&mut screen, "rahasia");

        let request = screen.request();
        assert_eq!(request.email, "admin@care.id");
        assert_eq!(request.password.as_str(), "rahasia");
    }

    #[test]
    fn test_enter_on_email_moves_to_password() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "admin@care.id");
        assert_eq!(screen.handle_key(&key(KeyCode::Enter)), LoginAction::None);
        type_text(&mut screen, "x");
        assert_eq!(screen.handle_key(&key(KeyCode::Enter)), LoginAction::Submit);
    }

    #[test]
    fn test_keys_ignored_while_submitting() {
        let mut screen = LoginScreen::new();
        screen.set_submitting();
        assert_eq!(screen.handle_key(&key(KeyCode::Esc)), LoginAction::None);
        type_text(&mut screen, "abc");
        assert!(screen.request().email.is_empty());
    }

    #[test]
    fn test_error_clears_password_and_resets_on_typing() {
        let mut screen = LoginScreen::new();
        screen.handle_key(&key(KeyCode::Tab));
        type_text(&mut screen, "wrong");
        screen.set_error("Invalid credentials or server error.");

        assert!(screen.request().password.is_empty());
        type_text(&mut screen, "r");
        assert_eq!(screen.state(), &LoginState::Input);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = LoginScreen::new();
        assert_eq!(screen.handle_key(&key(KeyCode::Esc)), LoginAction::Back);
    }
}
