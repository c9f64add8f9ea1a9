use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use panelcam_core::config::KeymapConfig;
use tracing::warn;

/// Viewer action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Next,
    Previous,
    First,
    Last,
    /// Snap to the keyframe closest to the path position
    Snap,
    Quit,
}

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

impl From<KeyEvent> for KeyBinding {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

/// Runtime keymap for key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    help_hint: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut labels = HashMap::new();

        let mut add_binding = |key_str: &str, action: Action| match parse_key_binding(key_str) {
            Some(binding) => {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                    labels.insert(action, key_str.trim().to_string());
                }
            }
            None => warn!("Invalid key binding: '{}', ignoring", key_str),
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.next, Action::Next);
        add_binding(&config.previous, Action::Previous);
        add_binding(&config.first, Action::First);
        add_binding(&config.last, Action::Last);
        add_binding(&config.snap, Action::Snap);

        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.entry(KeyBinding::simple(KeyCode::Home)).or_insert(Action::First);
        bindings.entry(KeyBinding::simple(KeyCode::End)).or_insert(Action::Last);

        Self {
            bindings,
            help_hint: help_hint(&labels),
        }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<Action> {
        self.bindings.get(binding).copied()
    }

    /// Status bar hint naming the configured keys
    pub fn help_hint(&self) -> &str {
        &self.help_hint
    }
}

fn help_hint(labels: &HashMap<Action, String>) -> String {
    let key = |action| labels.get(&action).map(String::as_str).unwrap_or("-");
    format!(
        " {}:quit {}/{}:frames {}/{}:first/last {}:snap ",
        key(Action::Quit),
        key(Action::Previous),
        key(Action::Next),
        key(Action::First),
        key(Action::Last),
        key(Action::Snap),
    )
}

/// Parse Vim-style key notation into a KeyBinding.
/// Supported formats:
/// - Single char: "l", "h", "q"
/// - Uppercase (Shift): "G"
/// - Ctrl / Shift: "<C-n>", "<S-Tab>"
/// - Special keys: "<CR>", "<Esc>", "<Tab>", "<Space>", "<PageDown>", ...
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    // Uppercase letters are Shift+letter
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        return parse_key_name(rest).map(KeyBinding::ctrl);
    }
    if let Some(rest) = inner.strip_prefix("S-") {
        return parse_key_name(rest).map(KeyBinding::shift);
    }
    parse_key_name(inner).map(KeyBinding::simple)
}

fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "space" | "spc" => Some(KeyCode::Char(' ')),
        "bs" | "backspace" => Some(KeyCode::Backspace),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c.to_ascii_lowercase())),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(parse_key_binding("l"), Some(KeyBinding::simple(KeyCode::Char('l'))));
        assert_eq!(parse_key_binding(" q "), Some(KeyBinding::simple(KeyCode::Char('q'))));
        assert_eq!(parse_key_binding("G"), Some(KeyBinding::shift(KeyCode::Char('G'))));
        assert_eq!(parse_key_binding("gg"), None);
        assert_eq!(parse_key_binding(""), None);
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(parse_key_binding("<C-n>"), Some(KeyBinding::ctrl(KeyCode::Char('n'))));
        assert_eq!(parse_key_binding("<Space>"), Some(KeyBinding::simple(KeyCode::Char(' '))));
        assert_eq!(parse_key_binding("<PageDown>"), Some(KeyBinding::simple(KeyCode::PageDown)));
        assert_eq!(parse_key_binding("<S-Tab>"), Some(KeyBinding::shift(KeyCode::Tab)));
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_keymap_from_default_config() {
        let keymap = Keymap::default();
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Char('l'))), Some(Action::Next));
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Char('h'))), Some(Action::Previous));
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Char('g'))), Some(Action::First));
        assert_eq!(keymap.get(&KeyBinding::shift(KeyCode::Char('G'))), Some(Action::Last));
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Char('s'))), Some(Action::Snap));
        assert_eq!(keymap.get(&KeyBinding::ctrl(KeyCode::Char('c'))), Some(Action::Quit));
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            next: "q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Char('q'))), Some(Action::Quit));
        assert!(keymap.help_hint().contains("/-:frames"));
    }

    #[test]
    fn test_help_hint_follows_config() {
        assert_eq!(
            Keymap::default().help_hint(),
            " q:quit h/l:frames g/G:first/last s:snap "
        );

        let config = KeymapConfig {
            next: "<Space>".to_string(),
            snap: "<C-s>".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.help_hint(),
            " q:quit h/<Space>:frames g/G:first/last <C-s>:snap "
        );
    }
}
