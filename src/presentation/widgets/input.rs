//! Text input widget.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

const MASK_CHAR: char = '•';

/// Text input field widget. The cursor is a character index, so editing is
/// safe for any UTF-8 input.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    masked: bool,
    multiline: bool,
    placeholder: String,
    label: String,
}

impl TextInput {
    /// Creates new input with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            masked: false,
            multiline: false,
            placeholder: String::new(),
            label: label.into(),
        }
    }

    /// Enables password masking.
    #[must_use]
    pub fn password(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Lets Enter insert line breaks and wraps long lines.
    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Sets initial value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns focus state.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns whether Enter inserts a line break.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Returns current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns cursor position in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Sets value and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if !self.multiline {
            self.value.retain(|c| c != '\n');
        }
        self.cursor = self.char_len();
    }

    /// Clears value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Inserts character at cursor.
    pub fn input_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        let index = self.byte_index();
        self.value.insert(index, c);
        self.cursor += 1;
    }

    /// Deletes character before cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index();
            self.value.remove(index);
        }
    }

    /// Deletes character at cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let index = self.byte_index();
            self.value.remove(index);
        }
    }

    /// Moves cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Moves cursor to start.
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Moves cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Applies an editing key. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                let index = self.byte_index();
                self.value.drain(..index);
                self.cursor = 0;
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.input_char(c);
            }
            KeyCode::Enter if self.multiline => self.input_char('\n'),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(index, _)| index)
    }

    fn display_text(&self) -> String {
        if self.masked {
            self.value.chars().map(|_| MASK_CHAR).collect()
        } else {
            self.value.clone()
        }
    }
}

/// Splits `text` into rows no wider than `width` cells, breaking at line
/// feeds, and returns the rows with the (row, column) of character `cursor`.
fn wrap_with_cursor(text: &str, cursor: usize, width: usize) -> (Vec<String>, (usize, usize)) {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut col = 0;
    let mut position = None;

    for (index, ch) in text.chars().enumerate() {
        if ch == '\n' {
            if index == cursor {
                position = Some((rows.len() - 1, col));
            }
            rows.push(String::new());
            col = 0;
            continue;
        }

        let ch_width = ch.width().unwrap_or(0);
        if col > 0 && col + ch_width > width {
            rows.push(String::new());
            col = 0;
        }
        if index == cursor {
            position = Some((rows.len() - 1, col));
        }
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
        col += ch_width;
    }

    let position = position.unwrap_or_else(|| {
        if col >= width {
            rows.push(String::new());
            (rows.len() - 1, 0)
        } else {
            (rows.len() - 1, col)
        }
    });

    (rows, position)
}

/// Drops leading characters of a single row until the cursor column fits.
fn scroll_row(row: &str, cursor_col: usize, width: usize) -> (String, usize) {
    if cursor_col < width {
        return (row.to_string(), cursor_col);
    }

    let mut skipped = 0;
    let mut chars = row.chars();
    for ch in chars.by_ref() {
        skipped += ch.width().unwrap_or(0);
        if cursor_col - skipped < width {
            break;
        }
    }
    (chars.collect(), cursor_col - skipped)
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.value.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            if self.focused {
                buf[(inner.x, inner.y)].set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
            return;
        }

        let width = usize::from(inner.width);
        let height = usize::from(inner.height);
        let display = self.display_text();

        let (rows, (cursor_row, cursor_col)) = if self.multiline {
            let (rows, (row, col)) = wrap_with_cursor(&display, self.cursor, width);
            let first = row.saturating_sub(height - 1);
            let visible: Vec<String> = rows.into_iter().skip(first).take(height).collect();
            (visible, (row - first, col))
        } else {
            let (rows, (_, col)) = wrap_with_cursor(&display, self.cursor, usize::MAX);
            let row = rows.into_iter().next().unwrap_or_default();
            let (visible, col) = scroll_row(&row, col, width);
            (vec![visible], (0, col))
        };

        let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .render(inner, buf);

        if self.focused {
            #[allow(clippy::cast_possible_truncation)]
            let (x, y) = (
                inner.x + cursor_col as u16,
                inner.y + cursor_row as u16,
            );
            if x < inner.right() && y < inner.bottom() {
                buf[(x, y)].set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn test_text_input_basic() {
        let mut input = TextInput::new("Test");
        assert!(input.value().is_empty());

        input.input_char('a');
        input.input_char('b');
        assert_eq!(input.value(), "ab");

        input.backspace();
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("Name").with_value("Café");
        input.move_left();
        input.input_char('é');
        assert_eq!(input.value(), "Caféé");
        assert_eq!(input.cursor(), 4);

        input.move_start();
        input.delete();
        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "afé");
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInput::new("Password").password();
        input.set_value("sécret");

        assert_eq!(input.display_text(), "••••••");
    }

    #[test]
    fn test_single_line_rejects_newlines() {
        let mut input = TextInput::new("Title").with_value("a\nb");
        assert_eq!(input.value(), "ab");
        assert!(!input.handle_key(&key(KeyCode::Enter)));
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_multiline_enter_inserts_break() {
        let mut input = TextInput::new("Description").multiline();
        input.handle_key(&key(KeyCode::Char('a')));
        assert!(input.handle_key(&key(KeyCode::Enter)));
        input.handle_key(&key(KeyCode::Char('b')));
        assert_eq!(input.value(), "a\nb");
    }

    #[test]
    fn test_ctrl_u_clears_to_start() {
        let mut input = TextInput::new("Query").with_value("hello world");
        for _ in 0..5 {
            input.move_left();
        }
        input.handle_key(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "world");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_unhandled_keys_pass_through() {
        let mut input = TextInput::new("Title");
        assert!(!input.handle_key(&key(KeyCode::Tab)));
        assert!(!input.handle_key(&key(KeyCode::Up)));
        assert!(!input.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_wrap_with_cursor() {
        let (rows, cursor) = wrap_with_cursor("abcdef\ngh", 8, 4);
        assert_eq!(rows, vec!["abcd", "ef", "gh"]);
        assert_eq!(cursor, (2, 1));

        let (rows, cursor) = wrap_with_cursor("abcd", 4, 4);
        assert_eq!(rows, vec!["abcd", ""]);
        assert_eq!(cursor, (1, 0));
    }

    #[test]
    fn test_wrap_counts_wide_chars() {
        let (rows, cursor) = wrap_with_cursor("日本語", 2, 4);
        assert_eq!(rows, vec!["日本", "語"]);
        assert_eq!(cursor, (1, 0));
    }

    #[test]
    fn test_scroll_row_keeps_cursor_visible() {
        assert_eq!(scroll_row("abc", 3, 10), ("abc".to_string(), 3));
        let (visible, col) = scroll_row("abcdefgh", 8, 4);
        assert_eq!(visible, "fgh");
        assert_eq!(col, 3);
    }
}
