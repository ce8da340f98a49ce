//! Key binding table.
//!
//! Maps single keys to command names. Binding strings use the same notation
//! as the config file (`^O`, `M-f`, `F10`, `PageDown`).

use std::collections::HashMap;

use tracing::warn;

use crate::config::Config;
use crate::core::input::{InputEvent, Key, ParseKeyError};

/// Result of looking a key event up in the keymap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// Key is bound to this command
    Command(String),
    /// Unbound printable key: insert it
    InsertChar(char),
    /// Unbound and not printable
    Unbound,
}

/// Normalize a key so caps lock does not change Ctrl/Alt bindings
fn normalize(key: Key) -> Key {
    match key {
        Key::Ctrl(c) => Key::Ctrl(c.to_ascii_lowercase()),
        Key::Alt(c) => Key::Alt(c.to_ascii_lowercase()),
        other => other,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<Key, String>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the keymap from the bindings in `config`.
    /// Unparseable binding strings are skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();
        for (key, command) in &config.keybindings {
            if let Err(e) = keymap.bind(key, command) {
                warn!(binding = %key, command = %command, "ignoring binding: {}", e);
            }
        }
        keymap
    }

    /// Bind a key string to a command, replacing any previous binding
    pub fn bind(&mut self, key: &str, command: &str) -> Result<(), ParseKeyError> {
        let key: Key = key.parse()?;
        self.bindings.insert(normalize(key), command.to_string());
        Ok(())
    }

    pub fn command_for(&self, key: Key) -> Option<&str> {
        self.bindings.get(&normalize(key)).map(String::as_str)
    }

    pub fn lookup(&self, event: &InputEvent) -> LookupResult {
        if let Some(cmd) = self.command_for(event.key) {
            return LookupResult::Command(cmd.to_string());
        }

        match event.key {
            Key::Char(c) if !event.ctrl && !event.alt && !c.is_control() => {
                LookupResult::InsertChar(c)
            }
            _ => LookupResult::Unbound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_lookup() {
        let mut keymap = Keymap::new();
        keymap.bind("^O", "open-file").unwrap();

        let event = InputEvent::new(Key::Ctrl('o'));
        assert_eq!(
            keymap.lookup(&event),
            LookupResult::Command("open-file".to_string())
        );

        // Caps lock delivers an upper-case control letter
        let event = InputEvent::new(Key::Ctrl('O'));
        assert_eq!(
            keymap.lookup(&event),
            LookupResult::Command("open-file".to_string())
        );
    }

    #[test]
    fn test_unbound_printable_inserts() {
        let keymap = Keymap::new();
        assert_eq!(
            keymap.lookup(&InputEvent::new(Key::Char('A'))),
            LookupResult::InsertChar('A')
        );
        assert_eq!(
            keymap.lookup(&InputEvent::new(Key::Ctrl('z'))),
            LookupResult::Unbound
        );
        assert_eq!(
            keymap.lookup(&InputEvent::new(Key::Esc)),
            LookupResult::Unbound
        );
    }

    #[test]
    fn test_rebinding_replaces() {
        let mut keymap = Keymap::new();
        keymap.bind("F2", "save-file").unwrap();
        keymap.bind("F2", "open-file").unwrap();
        assert_eq!(keymap.command_for(Key::F(2)), Some("open-file"));
    }

    #[test]
    fn test_bad_binding_is_rejected() {
        let mut keymap = Keymap::new();
        assert!(keymap.bind("Hyper-x", "exit").is_err());
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let mut config = Config::default();
        crate::user_config::configure(&mut config);
        let keymap = Keymap::from_config(&config);
        assert_eq!(keymap.command_for(Key::Ctrl('s')), Some("save-file"));
        assert_eq!(keymap.command_for(Key::Ctrl('q')), Some("exit"));
        assert_eq!(keymap.command_for(Key::F(10)), Some("menu-open"));
        assert_eq!(keymap.command_for(Key::Ctrl('o')), Some("open-file"));
    }
}
