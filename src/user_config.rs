// quill default configuration
// Every binding and setting here can be overridden in the config file
// (see `config`), e.g. `bind ^W save-file` or `set tab_width 8`.

use crate::config::Config;

/// Install the default key bindings and settings
pub fn configure(config: &mut Config) {
    // =========================================================================
    // FILE MENU
    // =========================================================================
    config.bind("^O", "open-file");
    config.bind("^S", "save-file");
    config.bind("^Q", "exit");
    config.bind("F10", "menu-open");

    // =========================================================================
    // MOVEMENT
    // =========================================================================
    config.bind("Right", "forward-character");
    config.bind("Left", "backward-character");
    config.bind("Down", "next-line");
    config.bind("Up", "previous-line");
    config.bind("^F", "forward-character");
    config.bind("^B", "backward-character");
    config.bind("^N", "next-line");
    config.bind("^P", "previous-line");
    config.bind("Home", "beginning-of-line");
    config.bind("End", "end-of-line");
    config.bind("^A", "beginning-of-line");
    config.bind("^E", "end-of-line");
    config.bind("PageUp", "backward-page");
    config.bind("PageDown", "forward-page");

    // =========================================================================
    // EDITING
    // =========================================================================
    config.bind("Enter", "insert-newline");
    config.bind("Tab", "insert-tab");
    config.bind("Backspace", "delete-previous-character");
    config.bind("Delete", "delete-next-character");

    // =========================================================================
    // EDITOR SETTINGS
    // =========================================================================
    config.set("tab_width", 4i64); // Display width of a tab character
    config.set("show_hidden", false); // List dotfiles in the file dialog

    // =========================================================================
    // FONT SETTINGS (GUI mode only)
    // =========================================================================
    // A font file path or a family name; unset picks the system monospace font
    // config.set("font", "DejaVu Sans Mono");
    config.set("font_size", 16i64); // Font size in pixels

    // =========================================================================
    // LOGGING
    // =========================================================================
    // Log file path; logging is off when neither this nor $QUILL_LOG is set
    // config.set("log_file", "/tmp/quill.log");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_configuration_defaults() {
        let mut config = Config::default();
        configure(&mut config);

        for (key, command) in [
            ("^O", "open-file"),
            ("^S", "save-file"),
            ("^Q", "exit"),
            ("F10", "menu-open"),
            ("PageDown", "forward-page"),
            ("Backspace", "delete-previous-character"),
        ] {
            assert_eq!(
                config.keybindings.get(key).map(String::as_str),
                Some(command),
                "binding for {}",
                key
            );
        }

        assert_eq!(config.get_int("tab_width"), Some(4));
        assert_eq!(config.get_bool("show_hidden"), Some(false));
        assert_eq!(config.get_int("font_size"), Some(16));
        assert_eq!(config.get_string("font"), None);
    }

    #[test]
    fn test_every_default_binding_parses() {
        let mut config = Config::default();
        configure(&mut config);
        for key in config.keybindings.keys() {
            assert!(
                key.parse::<crate::core::input::Key>().is_ok(),
                "unparseable key {}",
                key
            );
        }
    }
}
