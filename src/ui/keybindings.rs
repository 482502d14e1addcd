//! Keyboard shortcuts registry.
//!
//! Single source of truth for the form's key map, consumed by the key
//! handler in [`App`](crate::app::App) (through [`FormAction::from_key`]) and by the help
//! overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key, shown after a slash
    pub alt_key: Option<KeyCode>,
    /// Whether the primary key needs Ctrl held
    pub ctrl: bool,
    pub description: &'static str,
    pub category: ShortcutCategory,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Fields,
    Submission,
}

impl ShortcutCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Navigation => "Navigation",
            ShortcutCategory::Fields => "Fields",
            ShortcutCategory::Submission => "Submission",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::Navigation,
            ShortcutCategory::Fields,
            ShortcutCategory::Submission,
            ShortcutCategory::General,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "Ctrl+S", "PgDn/Ctrl+N")
    pub fn key_display(&self) -> String {
        let primary = if self.ctrl {
            format!("Ctrl+{}", format_keycode(&self.key))
        } else {
            format_keycode(&self.key)
        };
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for the help overlay (left-padded to 14 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<14}", self.key_display())
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if c.is_ascii_lowercase() => c.to_ascii_uppercase().to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", key),
    }
}

/// Form-level commands resolved from a key press.
///
/// Keys that do not map to an action belong to the focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Quit,
    NextSection,
    PrevSection,
    FocusNext,
    FocusPrev,
    Submit,
    DumpState,
    ToggleHelp,
}

impl FormAction {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => Some(FormAction::Quit),
            KeyCode::Char('n') if ctrl => Some(FormAction::NextSection),
            KeyCode::Char('p') if ctrl => Some(FormAction::PrevSection),
            KeyCode::Char('s') if ctrl => Some(FormAction::Submit),
            KeyCode::PageDown => Some(FormAction::NextSection),
            KeyCode::PageUp => Some(FormAction::PrevSection),
            KeyCode::Tab => Some(FormAction::FocusNext),
            KeyCode::BackTab => Some(FormAction::FocusPrev),
            KeyCode::F(1) => Some(FormAction::ToggleHelp),
            KeyCode::F(2) => Some(FormAction::DumpState),
            _ => None,
        }
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // Navigation
    Shortcut {
        key: KeyCode::Tab,
        alt_key: Some(KeyCode::BackTab),
        ctrl: false,
        description: "Next / previous field",
        category: ShortcutCategory::Navigation,
    },
    Shortcut {
        key: KeyCode::PageDown,
        alt_key: None,
        ctrl: false,
        description: "Next section (Ctrl+N)",
        category: ShortcutCategory::Navigation,
    },
    Shortcut {
        key: KeyCode::PageUp,
        alt_key: None,
        ctrl: false,
        description: "Previous section (Ctrl+P)",
        category: ShortcutCategory::Navigation,
    },
    // Fields
    Shortcut {
        key: KeyCode::Left,
        alt_key: Some(KeyCode::Right),
        ctrl: false,
        description: "Move over stars / cycle options",
        category: ShortcutCategory::Fields,
    },
    Shortcut {
        key: KeyCode::Char('1'),
        alt_key: Some(KeyCode::Char('5')),
        ctrl: false,
        description: "Rate directly",
        category: ShortcutCategory::Fields,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Char(' ')),
        ctrl: false,
        description: "Commit star / toggle checkbox",
        category: ShortcutCategory::Fields,
    },
    // Submission
    Shortcut {
        key: KeyCode::Char('s'),
        alt_key: None,
        ctrl: true,
        description: "Submit feedback",
        category: ShortcutCategory::Submission,
    },
    Shortcut {
        key: KeyCode::Char('r'),
        alt_key: None,
        ctrl: false,
        description: "Retry after an error",
        category: ShortcutCategory::Submission,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        ctrl: false,
        description: "Dismiss error or toast",
        category: ShortcutCategory::Submission,
    },
    // General
    Shortcut {
        key: KeyCode::F(1),
        alt_key: None,
        ctrl: false,
        description: "Toggle help",
        category: ShortcutCategory::General,
    },
    Shortcut {
        key: KeyCode::F(2),
        alt_key: None,
        ctrl: false,
        description: "Write form data to the log",
        category: ShortcutCategory::General,
    },
    Shortcut {
        key: KeyCode::Char('c'),
        alt_key: None,
        ctrl: true,
        description: "Quit",
        category: ShortcutCategory::General,
    },
];

/// Shortcuts grouped by category, in display order
pub fn shortcuts_by_category() -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    ShortcutCategory::all()
        .iter()
        .filter_map(|category| {
            let shortcuts: Vec<&Shortcut> = SHORTCUTS
                .iter()
                .filter(|s| s.category == *category)
                .collect();
            (!shortcuts.is_empty()).then_some((*category, shortcuts))
        })
        .collect()
}
