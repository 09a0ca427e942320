//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only the users list is driven through the keymap. The form and the
//! confirmation dialog use fixed keys, since typed characters there are text.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Move focus to the create form.
    NewUser,
    /// Ask to delete the selected user.
    DeleteSelection,
    /// Switch focus between the list and the form.
    SwitchPane,
    /// Flip between light and dark palettes.
    ToggleTheme,
    /// Hide the current notification.
    DismissNotification,
    OpenHelp,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Ignore this key.
    Ignore,
}

const ALL_ACTIONS: [KeyAction; 12] = [
    KeyAction::Quit,
    KeyAction::NewUser,
    KeyAction::DeleteSelection,
    KeyAction::SwitchPane,
    KeyAction::ToggleTheme,
    KeyAction::DismissNotification,
    KeyAction::OpenHelp,
    KeyAction::MoveUp,
    KeyAction::MoveDown,
    KeyAction::PageUp,
    KeyAction::PageDown,
    KeyAction::Ignore,
];

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings: arrows and vim-style j/k,
    /// plus single-letter commands.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Char('a')), KeyAction::NewUser);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Tab), KeyAction::SwitchPane);
        bindings.insert((M::NONE, Char('t')), KeyAction::ToggleTheme);
        bindings.insert((M::NONE, Char('x')), KeyAction::DismissNotification);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);

        Self { bindings }
    }

    /// Load bindings from `path` on top of the defaults.
    /// A missing or unreadable file yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::from_file(path) {
            Some(map) => {
                tracing::info!(path = %path.display(), "loaded keybindings");
                map
            }
            None => {
                tracing::warn!(path = %path.display(), "keybindings file unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a configuration file.
    ///
    /// Format: `<Action> = <KeySpec>`, or the reverse `<KeySpec> = <Action>`.
    /// Lines that parse neither way are skipped. Returns `None` only if the
    /// file cannot be read.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            let (lhs, rhs) = (lhs.trim(), rhs.trim());
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        map
    }

    /// Write the current bindings as a reference config.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdeck keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Alt+x, Shift+Up, Enter, Esc, Tab, Up, Down, PageUp, PageDown, Delete, j, k\n");
        buf.push_str("# Modifiers: Ctrl+, Alt+, Shift+ (combinable, e.g. Ctrl+Alt+d)\n");
        let names: Vec<&str> = ALL_ACTIONS.iter().map(|a| format_action(*a)).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut entries: Vec<(String, KeyAction)> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| (Self::format_key(*mods, *code), *action))
            .collect();
        entries.sort_by(|a, b| format_action(a.1).cmp(format_action(b.1)).then(a.0.cmp(&b.0)));
        for (key, action) in entries {
            let _ = writeln!(&mut buf, "{} = {}", format_action(action), key);
        }
        std::fs::write(path, buf)
    }

    /// Resolve a key event to its action.
    ///
    /// Terminals disagree on whether shifted symbols like `?` carry SHIFT, so
    /// a SHIFT-only character falls back to its unmodified binding.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if let Some(action) = self.bindings.get(&(key.modifiers, key.code)) {
            return Some(*action);
        }
        match key.code {
            KeyCode::Char(_) if key.modifiers == KeyModifiers::SHIFT => {
                self.bindings.get(&(KeyModifiers::NONE, key.code)).copied()
            }
            _ => None,
        }
    }

    /// Keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys
    }

    /// Format a key (modifiers + code) into a spec like "Ctrl+q", "Alt+Shift+Up" or "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        let mut spec = String::new();
        for (modifier, prefix) in MODIFIER_PREFIXES {
            if mods.contains(modifier) {
                spec.push_str(prefix);
            }
        }
        spec.push_str(&base);
        spec
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

const MODIFIER_PREFIXES: [(KeyModifiers, &str); 3] = [
    (KeyModifiers::CONTROL, "Ctrl+"),
    (KeyModifiers::ALT, "Alt+"),
    (KeyModifiers::SHIFT, "Shift+"),
];

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let mut rest = spec.trim();
    let mut mods = KeyModifiers::NONE;
    'prefixes: loop {
        for (modifier, prefix) in MODIFIER_PREFIXES {
            if let Some(after) = rest.strip_prefix(prefix) {
                mods |= modifier;
                rest = after;
                continue 'prefixes;
            }
        }
        break;
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    ALL_ACTIONS.iter().copied().find(|a| format_action(*a) == s.trim())
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::NewUser => "NewUser",
        KeyAction::DeleteSelection => "DeleteSelection",
        KeyAction::SwitchPane => "SwitchPane",
        KeyAction::ToggleTheme => "ToggleTheme",
        KeyAction::DismissNotification => "DismissNotification",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::Ignore => "Ignore",
    }
}
