use chrono::{DateTime, Datelike, Local, NaiveDate, Weekday};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Helper function to create a centered rect using up certain percentage of the available rect `r`
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Centers a `width` x `height` box in `r`, shrinking it to fit.
#[must_use]
pub fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

/// Reads the calendar date of an API timestamp. Full timestamps are shown in
/// local time; bare `YYYY-MM-DD` dates are taken as-is.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let local: DateTime<Local> = dt.into();
        return Some(local.date_naive());
    }

    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Short Indonesian date, `15/1/2024`. Unparseable input is returned as-is.
#[must_use]
pub fn format_short_date(raw: &str) -> String {
    parse_date(raw).map_or_else(
        || raw.to_string(),
        |date| format!("{}/{}/{}", date.day(), date.month(), date.year()),
    )
}

/// Long Indonesian date, `Senin, 15 Januari 2024`.
#[must_use]
pub fn format_long_date(raw: &str) -> String {
    let Some(date) = parse_date(raw) else {
        return raw.to_string();
    };

    let weekday = match date.weekday() {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    };
    let month = MONTHS_ID[date.month0() as usize];
    format!("{weekday}, {} {month} {}", date.day(), date.year())
}

/// Cuts `text` to `max_width` terminal cells, ending with `...` when cut.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(&"..."[..max_width.min(3)]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2024-01-15", "15/1/2024" ; "bare date")]
    #[test_case("2024-12-03T00:00:00.000", "3/12/2024" ; "naive timestamp")]
    #[test_case("soon", "soon" ; "unparseable")]
    fn test_format_short_date(raw: &str, expected: &str) {
        assert_eq!(format_short_date(raw), expected);
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("2024-01-15"), "Senin, 15 Januari 2024");
        assert_eq!(format_long_date("2025-08-17"), "Minggu, 17 Agustus 2025");
        assert_eq!(format_long_date(""), "");
    }

    #[test]
    fn test_parse_date_rfc3339() {
        assert!(parse_date("2024-06-01T10:00:00Z").is_some());
        assert!(parse_date("2024-13-01").is_none());
    }

    #[test_case("Banjir Bekasi", 20, "Banjir Bekasi" ; "fits")]
    #[test_case("Banjir Bekasi", 9, "Banjir..." ; "cut")]
    #[test_case("日本語テキスト", 7, "日本..." ; "wide chars")]
    #[test_case("abcdef", 2, ".." ; "tiny width")]
    fn test_truncate_to_width(text: &str, width: usize, expected: &str) {
        assert_eq!(truncate_to_width(text, width), expected);
    }

    #[test]
    fn test_centered_fixed_shrinks() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_fixed(40, 40, area), area);
    }
}
