use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{Notification, NotificationLevel};

/// Toast drawn in the top-right corner.
pub struct NotificationPopup<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationPopup<'a> {
    /// Creates popup for `notification`.
    #[must_use]
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }

    const fn color(&self) -> Color {
        match self.notification.level {
            NotificationLevel::Info => Color::Cyan,
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Error => Color::Red,
        }
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.notification.title());
        let message = &self.notification.message;

        let max_popup_width = 60.min(area.width.saturating_sub(2));
        let width = u16::try_from(message.width())
            .unwrap_or(u16::MAX)
            .max(u16::try_from(title.width()).unwrap_or(0))
            .saturating_add(4)
            .min(max_popup_width);

        let inner_width = width.saturating_sub(2).max(1);
        let content_width = u16::try_from(message.width()).unwrap_or(0);
        let lines = content_width.div_ceil(inner_width);
        let height = lines.saturating_add(2).clamp(3, 10);

        let x = area.x + area.width.saturating_sub(width).saturating_sub(2);
        let y = area.y + 1;

        let popup_area = Rect::new(x, y, width, height);
        let intersection = area.intersection(popup_area);
        if intersection.area() == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(self.color()));

        let para = Paragraph::new(message.as_str())
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().add_modifier(Modifier::BOLD));

        Clear.render(intersection, buf);
        para.render(intersection, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(notification: &Notification) -> Buffer {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        NotificationPopup::new(notification).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_in_top_right_corner() {
        let notification = Notification::new(NotificationLevel::Success, "Activity created successfully!");
        let buf = rendered(&notification);

        let body = row_text(&buf, 2);
        assert!(body.contains("Activity created successfully!"));
        assert!(body.trim_end().len() > 40);
        assert!(row_text(&buf, 1).contains("Success"));
        assert_eq!(buf[(79, 2)].symbol(), " ");
    }

    #[test]
    fn test_error_uses_red_border() {
        let notification = Notification::new(NotificationLevel::Error, "Failed to delete news.");
        let buf = rendered(&notification);
        let border = (0..80u16)
            .find(|x| buf[(*x, 1)].symbol() == "┌")
            .expect("border drawn");
        assert_eq!(buf[(border, 1)].fg, Color::Red);
    }
}
