//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

/// Rows scrolled per mouse wheel notch
pub const WHEEL_ROWS: isize = 3;

/// Key mapping without modifiers
pub fn key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::FocusFirst),
        KeyCode::Char('G') | KeyCode::End => Some(Action::FocusLast),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleOpen),
        KeyCode::Char('m') | KeyCode::Char('x') => Some(Action::ToggleComplete),
        KeyCode::Char('t') => Some(Action::BackToTop),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping with modifiers (for Ctrl combinations)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('d') => Some(Action::HalfPageDown),
            KeyCode::Char('u') => Some(Action::HalfPageUp),
            KeyCode::Char('f') => Some(Action::PageDown),
            KeyCode::Char('b') => Some(Action::PageUp),
            KeyCode::Char('e') => Some(Action::ScrollDown),
            KeyCode::Char('y') => Some(Action::ScrollUp),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        }
    } else {
        key_to_action(key)
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Focus
    FocusNext,
    FocusPrev,
    FocusFirst,
    FocusLast,

    // Scrolling
    ScrollUp,
    ScrollDown,
    HalfPageUp,
    HalfPageDown,
    PageUp,
    PageDown,
    BackToTop,

    // Cards
    ToggleOpen,
    ToggleComplete,

    Help,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j_and_k_move_focus() {
        assert_eq!(key_to_action(KeyCode::Char('j')), Some(Action::FocusNext));
        assert_eq!(key_to_action(KeyCode::Char('k')), Some(Action::FocusPrev));
    }

    #[test]
    fn enter_and_space_toggle_open() {
        assert_eq!(key_to_action(KeyCode::Enter), Some(Action::ToggleOpen));
        assert_eq!(key_to_action(KeyCode::Char(' ')), Some(Action::ToggleOpen));
    }

    #[test]
    fn m_toggles_completion() {
        assert_eq!(key_to_action(KeyCode::Char('m')), Some(Action::ToggleComplete));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(key_to_action(KeyCode::Char('z')), None);
    }

    #[test]
    fn ctrl_d_half_page_down() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('d'), KeyModifiers::CONTROL),
            Some(Action::HalfPageDown)
        );
    }

    #[test]
    fn plain_d_is_unmapped() {
        assert_eq!(key_with_modifier_to_action(KeyCode::Char('d'), KeyModifiers::NONE), None);
    }
}
