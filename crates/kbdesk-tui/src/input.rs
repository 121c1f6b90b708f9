use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kbdesk_core::session::Page;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    NextTab,
    ShowChat,
    ShowKnowledgeBase,
    FocusInput,
    MoveUp,
    MoveDown,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    PrevPage,
    NextPage,
    GoToPage(u32), // Digit on the knowledge base page
    StartSearch,
    AddArticle,
    DeleteArticle,
    Refresh,
    OpenInBrowser,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match &app.mode {
        Mode::ChatInput | Mode::Search(_) | Mode::AddArticle => return handle_input_mode(key),
        Mode::DeleteConfirm => return handle_confirm_mode(key),
        // Any key exits help
        Mode::Help => return Action::ExitMode,
        Mode::Normal => {}
    }

    let binding = KeyBinding::from_event(&key);

    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap.sequence_action().cloned().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    if let Some(action) = keymap.get(&binding) {
        return action.clone();
    }

    // Page numbers jump directly on the knowledge base page
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if app.nav.is_active(Page::KnowledgeBase) && binding.modifiers.is_empty() {
            return Action::GoToPage(c.to_digit(10).unwrap_or(1));
        }
    }

    Action::None
}

/// Handle key events in text entry modes (chat input, search, add URL)
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Handle key events in confirmation mode
fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kbdesk_core::AppConfig;

    use super::*;
    use crate::theme::Theme;

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_uses_keymap() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &app, &keymap), Action::Quit);
        assert_eq!(handle_key_event(press(KeyCode::F(2)), &app, &keymap), Action::ShowKnowledgeBase);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT), &app, &keymap),
            Action::Help
        );
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = app();
        let keymap = Keymap::default();
        assert_eq!(handle_key_event(press(KeyCode::Char('g')), &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(press(KeyCode::Char('g')), &app, &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_digits_only_on_knowledge_base() {
        let mut app = app();
        let keymap = Keymap::default();
        assert_eq!(handle_key_event(press(KeyCode::Char('3')), &app, &keymap), Action::None);

        app.nav.activate(Page::KnowledgeBase);
        assert_eq!(handle_key_event(press(KeyCode::Char('3')), &app, &keymap), Action::GoToPage(3));
    }

    #[test]
    fn test_input_mode_captures_bound_keys() {
        let mut app = app();
        app.mode = Mode::ChatInput;
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q')), &app, &keymap),
            Action::InputChar('q')
        );
        assert_eq!(handle_key_event(press(KeyCode::Enter), &app, &keymap), Action::Confirm);
    }

    #[test]
    fn test_confirm_mode() {
        let mut app = app();
        app.mode = Mode::DeleteConfirm;
        let keymap = Keymap::default();
        assert_eq!(handle_key_event(press(KeyCode::Char('y')), &app, &keymap), Action::Confirm);
        assert_eq!(handle_key_event(press(KeyCode::Char('d')), &app, &keymap), Action::None);
        assert_eq!(handle_key_event(press(KeyCode::Esc), &app, &keymap), Action::Cancel);
    }
}
