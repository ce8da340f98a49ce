//! Configuration
//!
//! `Config` is seeded with defaults by `user_config::configure` and then
//! overlaid by an optional config file:
//!
//! ```text
//! # comment
//! set tab_width 8
//! set font "DejaVu Sans Mono"
//! bind ^W save-file
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{EditorError, Result};

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl ConfigValue {
    /// Parse a value as written in the config file: `true`/`false`, an
    /// integer, or a string (surrounding double quotes are stripped)
    pub fn parse(text: &str) -> Self {
        match text {
            "true" => return ConfigValue::Bool(true),
            "false" => return ConfigValue::Bool(false),
            _ => {}
        }
        if let Ok(i) = text.parse::<i64>() {
            return ConfigValue::Int(i);
        }
        let unquoted = text
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(text);
        ConfigValue::String(unquoted.to_string())
    }
}

impl Config {
    /// Bind a key to a command
    pub fn bind(&mut self, key: &str, command: &str) {
        self.keybindings
            .insert(key.to_string(), command.to_string());
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Apply the lines of a config file on top of the current values
    pub fn apply_str(&mut self, text: &str) -> Result<()> {
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            let (directive, rest) = split_word(line);
            let (name, value) = split_word(rest);
            let err = |message: String| EditorError::Config {
                line: line_no,
                message,
            };
            if name.is_empty() || value.is_empty() {
                return Err(err(format!("expected `{} <name> <value>`", directive)));
            }

            match directive {
                "set" => self.set(name, ConfigValue::parse(value)),
                "bind" => self.bind(name, value),
                other => return Err(err(format!("unknown directive `{}`", other))),
            }
        }
        Ok(())
    }

    /// Read and apply a config file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        self.apply_str(&text)
    }
}

/// Where the config file lives: `$QUILL_CONFIG`, then
/// `$XDG_CONFIG_HOME/quill/config`, then `$HOME/.config/quill/config`.
/// `env` looks up an environment variable.
pub fn config_path(env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let non_empty = |name: &str| env(name).filter(|v| !v.is_empty());
    if let Some(path) = non_empty("QUILL_CONFIG") {
        return Some(PathBuf::from(path));
    }
    if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("quill").join("config"));
    }
    non_empty("HOME").map(|home| PathBuf::from(home).join(".config").join("quill").join("config"))
}

/// `#` starts a comment unless it is inside double quotes
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.keybindings.is_empty());
        assert!(config.settings.is_empty());
    }

    #[test]
    fn test_set_get_settings() {
        let mut config = Config::default();

        config.set("bool_setting", true);
        assert_eq!(config.get_bool("bool_setting"), Some(true));

        config.set("int_setting", 42i64);
        assert_eq!(config.get_int("int_setting"), Some(42));

        config.set("string_setting", "hello");
        assert_eq!(config.get_string("string_setting"), Some("hello"));

        // Wrong type reads as None
        assert_eq!(config.get_bool("int_setting"), None);
    }

    #[test]
    fn test_apply_file_text() {
        let mut config = Config::default();
        config.bind("^S", "save-file");
        config
            .apply_str(
                "# quill config\n\
                 set tab_width 8\n\
                 set show_hidden true   # trailing comment\n\
                 set font \"Fira Code #2\"\n\
                 \n\
                 bind ^S exit\n",
            )
            .unwrap();

        assert_eq!(config.get_int("tab_width"), Some(8));
        assert_eq!(config.get_bool("show_hidden"), Some(true));
        assert_eq!(config.get_string("font"), Some("Fira Code #2"));
        assert_eq!(config.keybindings.get("^S").map(String::as_str), Some("exit"));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let mut config = Config::default();
        let err = config.apply_str("set a 1\nfrobnicate x y\n").unwrap_err();
        assert!(matches!(err, EditorError::Config { line: 2, .. }));

        let err = config.apply_str("\n\nbind ^X\n").unwrap_err();
        assert!(matches!(err, EditorError::Config { line: 3, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        let err = config.load_file(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
    }

    #[test]
    fn test_config_path_precedence() {
        let env = |vars: &'static [(&'static str, &'static str)]| {
            move |name: &str| {
                vars.iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| v.to_string())
            }
        };

        assert_eq!(
            config_path(env(&[("QUILL_CONFIG", "/etc/q"), ("HOME", "/home/u")])),
            Some(PathBuf::from("/etc/q"))
        );
        assert_eq!(
            config_path(env(&[("XDG_CONFIG_HOME", "/x"), ("HOME", "/home/u")])),
            Some(PathBuf::from("/x/quill/config"))
        );
        assert_eq!(
            config_path(env(&[("HOME", "/home/u")])),
            Some(PathBuf::from("/home/u/.config/quill/config"))
        );
        assert_eq!(config_path(env(&[])), None);
    }
}
