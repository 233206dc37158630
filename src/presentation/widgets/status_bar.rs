//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Bottom line: a status message on the left, key hints in the middle and
/// the signed-in user on the right.
#[derive(Debug, Clone)]
pub struct StatusBar {
    left: String,
    hints: Vec<(String, String)>,
    right: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: String::new(),
            hints: Vec::new(),
            right: String::new(),
            level: StatusLevel::Info,
        }
    }

    /// Sets left content.
    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    /// Adds a key hint such as `Esc back`.
    #[must_use]
    pub fn hint(mut self, key: impl Into<String>, action: impl Into<String>) -> Self {
        self.hints.push((key.into(), action.into()));
        self
    }

    /// Sets right content.
    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    /// Sets status level.
    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }

    /// Creates info status bar.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new().left(message).level(StatusLevel::Info)
    }

    /// Creates warning status bar.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new().left(message).level(StatusLevel::Warning)
    }

    /// Creates error status bar.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new().left(message).level(StatusLevel::Error)
    }

    fn hint_spans(&self) -> Vec<Span<'_>> {
        let key_style = Style::default()
            .fg(Color::Black)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);
        let mut spans = Vec::new();
        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!(" {key} "), key_style));
            spans.push(Span::styled(
                format!(" {action}"),
                Style::default().fg(Color::Gray),
            ));
        }
        spans
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);

        let width = area.width as usize;

        let hints = self.hint_spans();
        let left_len = self.left.width();
        let center_len: usize = hints.iter().map(|s| s.content.width()).sum();
        let right_len = self.right.width();

        let center_start = width.saturating_sub(center_len) / 2;
        let right_start = width.saturating_sub(right_len);

        let mut spans = Vec::new();

        spans.push(Span::styled(self.left.as_str(), style));

        let left_padding = center_start.saturating_sub(left_len).max(1);
        spans.push(Span::raw(" ".repeat(left_padding)));
        spans.extend(hints);

        let current_len = left_len + left_padding + center_len;
        let right_padding = right_start.saturating_sub(current_len);
        if right_padding > 0 {
            spans.push(Span::raw(" ".repeat(right_padding)));
        }

        if !self.right.is_empty() && right_padding > 0 {
            spans.push(Span::styled(
                self.right.as_str(),
                Style::default().fg(Color::Gray),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_text(bar: &StatusBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_hints_and_right_text() {
        let bar = StatusBar::info("Home")
            .hint("Enter", "open")
            .hint("q", "quit")
            .right("Rina");
        let text = render_text(&bar, 60);

        assert!(text.starts_with("Home"));
        assert!(text.contains(" Enter  open"));
        assert!(text.contains(" q  quit"));
        assert!(text.trim_end().ends_with("Rina"));
    }

    #[test]
    fn test_right_text_dropped_when_crowded() {
        let bar = StatusBar::error("Failed to load activities.")
            .hint("r", "retry")
            .right("someone@example.org");
        let text = render_text(&bar, 30);

        assert!(text.starts_with("Failed"));
        assert!(!text.contains("someone"));
    }
}
