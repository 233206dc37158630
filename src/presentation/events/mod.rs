//! Key classification shared by screens.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Terminal key classifier.
pub struct EventHandler;

impl EventHandler {
    /// Checks if the event is a press or auto-repeat. Release events are
    /// reported by some terminals and must be ignored.
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Checks if key quits from anywhere.
    #[must_use]
    pub fn is_force_quit(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c' | 'q'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key is a plain `q`, which quits from screens without text
    /// fields.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }

    /// Checks if key leaves the current screen or overlay.
    #[must_use]
    pub fn is_back_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Esc,
                ..
            }
        )
    }

    /// Checks if key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }

    /// Checks if key saves a whole form (`Ctrl+S`).
    #[must_use]
    pub fn is_save_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('s'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key moves focus forward.
    #[must_use]
    pub fn is_focus_next(key: &KeyEvent) -> bool {
        key.code == KeyCode::Tab && !key.modifiers.contains(KeyModifiers::SHIFT)
    }

    /// Checks if key moves focus backward.
    #[must_use]
    pub fn is_focus_prev(key: &KeyEvent) -> bool {
        key.code == KeyCode::BackTab
            || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test_case(KeyCode::Char('c'), KeyModifiers::CONTROL, true ; "ctrl c")]
    #[test_case(KeyCode::Char('q'), KeyModifiers::CONTROL, true ; "ctrl q")]
    #[test_case(KeyCode::Char('q'), KeyModifiers::NONE, false ; "plain q")]
    #[test_case(KeyCode::Esc, KeyModifiers::NONE, false ; "escape")]
    fn test_force_quit(code: KeyCode, modifiers: KeyModifiers, expected: bool) {
        assert_eq!(
            EventHandler::is_force_quit(&make_key_event(code, modifiers)),
            expected
        );
    }

    #[test]
    fn test_quit_and_back() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('Q'),
            KeyModifiers::SHIFT
        )));
        assert!(EventHandler::is_back_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_submit_event() {
        assert!(EventHandler::is_submit_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_submit_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::SHIFT
        )));
        assert!(!EventHandler::is_submit_event(&make_key_event(
            KeyCode::Char('a'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_save_and_focus() {
        assert!(EventHandler::is_save_event(&make_key_event(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL
        )));
        assert!(EventHandler::is_focus_next(&make_key_event(
            KeyCode::Tab,
            KeyModifiers::NONE
        )));
        assert!(EventHandler::is_focus_prev(&make_key_event(
            KeyCode::BackTab,
            KeyModifiers::SHIFT
        )));
    }

    #[test]
    fn test_release_is_not_press() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        assert!(!EventHandler::is_press(&release));
        assert!(EventHandler::is_press(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
    }
}
