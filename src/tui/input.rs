//! Input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be triggered by key events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Submit the current input
    Submit,
    /// Cancel current operation (close dialog)
    Cancel,
    /// Insert a newline
    Newline,
    /// Move cursor left
    Left,
    /// Move cursor right
    Right,
    /// Move to start of line
    Home,
    /// Move to end of line
    End,
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    Delete,
    /// Insert character
    Char(char),
    /// Clear input
    ClearInput,
    /// Save the transcript to disk
    SaveTranscript,
    /// Open model selector
    ModelSelector,
    /// No action
    None,
}

/// Convert a key event to an action
pub fn key_to_action(key: KeyEvent) -> Action {
    // Try each category of keys in order
    check_quit_keys(&key)
        .or_else(|| check_enter_keys(&key))
        .or_else(|| check_navigation_keys(&key))
        .or_else(|| check_editing_keys(&key))
        .or_else(|| check_control_keys(&key))
        .or_else(|| check_char_keys(&key))
        .unwrap_or(Action::None)
}

/// Check for quit key combinations
fn check_quit_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('d'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::Quit),
        _ => None,
    }
}

/// Check for enter key combinations
fn check_enter_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        // Submit (Enter)
        KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            ..
        } => Some(Action::Submit),
        // Newline (Shift+Enter, Alt+Enter)
        KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::SHIFT,
            ..
        }
        | KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::ALT,
            ..
        } => Some(Action::Newline),
        // Cancel (Escape)
        KeyEvent {
            code: KeyCode::Esc, ..
        } => Some(Action::Cancel),
        _ => None,
    }
}

/// Check for navigation keys
fn check_navigation_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            ..
        } => Some(Action::Left),
        KeyEvent {
            code: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
            ..
        } => Some(Action::Right),
        KeyEvent {
            code: KeyCode::Home,
            ..
        } => Some(Action::Home),
        KeyEvent {
            code: KeyCode::End, ..
        } => Some(Action::End),
        _ => None,
    }
}

/// Check for editing keys
fn check_editing_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => Some(Action::Backspace),
        KeyEvent {
            code: KeyCode::Delete,
            ..
        } => Some(Action::Delete),
        _ => None,
    }
}

/// Check for control key combinations
fn check_control_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        // Line navigation shortcuts
        KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::Home),
        KeyEvent {
            code: KeyCode::Char('e'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::End),
        // Clear input
        KeyEvent {
            code: KeyCode::Char('u'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::ClearInput),
        // Save transcript
        KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::SaveTranscript),
        // Model selector
        KeyEvent {
            code: KeyCode::Char('m'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::ModelSelector),
        _ => None,
    }
}

/// Check for character input keys
fn check_char_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::SHIFT,
            ..
        } => Some(Action::Char(*c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_submits() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(key_to_action(key), Action::Submit);
    }

    #[test]
    fn test_shift_enter_newline() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT);
        assert_eq!(key_to_action(key), Action::Newline);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(key), Action::Quit);
    }

    #[test]
    fn test_ctrl_s_saves() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(key), Action::SaveTranscript);
    }

    #[test]
    fn test_ctrl_m_opens_model_selector() {
        let key = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(key), Action::ModelSelector);
    }

    #[test]
    fn test_plain_char() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(key_to_action(key), Action::Char('x'));
    }

    #[test]
    fn test_unmapped_key_is_none() {
        let key = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(key_to_action(key), Action::None);
    }
}
