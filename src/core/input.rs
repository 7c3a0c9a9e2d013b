/// Keyboard decoding for the answer entries. Stateless.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// An ASCII digit to append to the active entry.
    Digit(char),
    /// Backspace: drop the last digit.
    Erase,
    /// Delete: empty the entry.
    Clear,
    Submit,
    Quit,
    /// Anything else. Never reaches the entry buffer.
    Rejected,
}

/// Only digits and the two edit keys may touch an entry's text.
pub fn accepts(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char(c) if c.is_ascii_digit()
    ) || matches!(key.code, KeyCode::Backspace | KeyCode::Delete)
}

pub fn classify(key: &KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Rejected;
    }
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Backspace => KeyAction::Erase,
        KeyCode::Delete => KeyAction::Clear,
        KeyCode::Char(c) if accepts(key) => KeyAction::Digit(c),
        _ => KeyAction::Rejected,
    }
}
