use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kbdesk_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Notation that starts the two-key jump sequence
const JUMP_SEQUENCE: &str = "gg";

/// A key plus the modifiers that must accompany it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Parse config notation: a single character (`j`, `G`, `/`), a control
    /// chord (`<C-d>`), or a named key (`<Tab>`, `<CR>`, `<F2>`).
    pub fn parse(notation: &str) -> Option<Self> {
        let notation = notation.trim();

        if let Some(inner) = notation.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            if let Some(key) = inner.strip_prefix("C-") {
                return single_char(key).map(|c| Self::ctrl(c.to_ascii_lowercase()));
            }
            return named_key(inner).map(Self::plain);
        }

        single_char(notation).map(|c| Self::from_char(c, KeyModifiers::NONE))
    }

    /// Normalize a terminal key event so it compares equal to a parsed binding.
    /// Terminals disagree on whether shifted symbols carry SHIFT, so SHIFT is
    /// kept only for uppercase letters.
    pub fn from_event(key: &KeyEvent) -> Self {
        match key.code {
            KeyCode::Char(c) => Self::from_char(c, key.modifiers.difference(KeyModifiers::SHIFT)),
            code => Self::new(code, key.modifiers),
        }
    }

    fn from_char(c: char, mut modifiers: KeyModifiers) -> Self {
        if c.is_ascii_uppercase() {
            modifiers |= KeyModifiers::SHIFT;
        }
        Self::new(KeyCode::Char(c), modifiers)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn named_key(name: &str) -> Option<KeyCode> {
    let name = name.to_ascii_lowercase();
    let code = match name.as_str() {
        "cr" | "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "bs" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        _ => {
            let n: u8 = name.strip_prefix('f')?.parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
    };
    Some(code)
}

/// Key-to-action lookup built from `[keymap]`
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action bound to `gg`, if any
    sequence_action: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let table = [
            (&config.quit, Action::Quit),
            (&config.help, Action::Help),
            (&config.next_tab, Action::NextTab),
            (&config.chat_tab, Action::ShowChat),
            (&config.knowledge_tab, Action::ShowKnowledgeBase),
            (&config.focus_input, Action::FocusInput),
            (&config.move_down, Action::MoveDown),
            (&config.move_up, Action::MoveUp),
            (&config.scroll_half_down, Action::ScrollHalfPageDown),
            (&config.scroll_half_up, Action::ScrollHalfPageUp),
            (&config.jump_to_top, Action::JumpToTop),
            (&config.jump_to_bottom, Action::JumpToBottom),
            (&config.prev_page, Action::PrevPage),
            (&config.next_page, Action::NextPage),
            (&config.search, Action::StartSearch),
            (&config.add_article, Action::AddArticle),
            (&config.delete_article, Action::DeleteArticle),
            (&config.refresh, Action::Refresh),
            (&config.open_browser, Action::OpenInBrowser),
        ];

        let mut bindings = HashMap::new();
        let mut sequence_action = None;

        for (notation, action) in table {
            if notation.trim() == JUMP_SEQUENCE {
                sequence_action = Some(action);
                continue;
            }
            let Some(binding) = KeyBinding::parse(notation) else {
                warn!(key = %notation, ?action, "Invalid key binding, ignoring");
                continue;
            };
            if let Some(existing) = bindings.get(&binding) {
                warn!(key = %notation, ?existing, ?action, "Key already bound, ignoring");
                continue;
            }
            bindings.insert(binding, action);
        }

        // Fixed keys; configured ones win except for Ctrl-C and Esc
        bindings.insert(KeyBinding::ctrl('c'), Action::Quit);
        bindings.insert(KeyBinding::plain(KeyCode::Esc), Action::ExitMode);
        for (code, action) in [
            (KeyCode::Up, Action::MoveUp),
            (KeyCode::Down, Action::MoveDown),
            (KeyCode::Left, Action::PrevPage),
            (KeyCode::Right, Action::NextPage),
            (KeyCode::Enter, Action::FocusInput),
        ] {
            bindings.entry(KeyBinding::plain(code)).or_insert(action);
        }

        Self {
            bindings,
            sequence_action,
        }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Action completed by a second `g`
    pub fn sequence_action(&self) -> Option<&Action> {
        self.sequence_action.as_ref()
    }

    /// True when a bare `g` should wait for the second key
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.sequence_action.is_some() && *binding == KeyBinding::plain(KeyCode::Char('g'))
    }
}
