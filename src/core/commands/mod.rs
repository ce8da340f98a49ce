//! Command implementations
//!
//! - **movement**: Cursor navigation (forward-character, next-line, forward-page, ...)
//! - **editing**: Basic text editing (insert-newline, delete-next-character, ...)
//! - **file**: open-file and save-file
//! - **control**: exit and menu-open
//!
//! All commands implement the [`Command`](crate::core::command::Command) trait.

/// Application control
pub mod control;
/// Basic editing (insert, delete)
pub mod editing;
/// File operations
pub mod file;
/// Cursor movement commands
pub mod movement;

use std::collections::HashMap;

use crate::core::app::EditorApp;
use crate::core::command::Command;

/// Register all commands in the application
pub fn register_all(app: &mut EditorApp) {
    use self::control::*;
    use self::editing::*;
    use self::file::*;
    use self::movement::*;

    let mut registry: HashMap<String, Box<dyn Command>> = HashMap::new();

    // File menu
    registry.insert("open-file".to_string(), Box::new(OpenFile));
    registry.insert("save-file".to_string(), Box::new(SaveFile));
    registry.insert("exit".to_string(), Box::new(Exit));
    registry.insert("menu-open".to_string(), Box::new(MenuOpen));

    // Movement commands
    registry.insert("forward-character".to_string(), Box::new(ForwardChar));
    registry.insert("backward-character".to_string(), Box::new(BackwardChar));
    registry.insert("next-line".to_string(), Box::new(NextLine));
    registry.insert("previous-line".to_string(), Box::new(PreviousLine));
    registry.insert("beginning-of-line".to_string(), Box::new(BeginningOfLine));
    registry.insert("end-of-line".to_string(), Box::new(EndOfLine));
    registry.insert("forward-page".to_string(), Box::new(ForwardPage));
    registry.insert("backward-page".to_string(), Box::new(BackwardPage));

    // Editing commands
    registry.insert("insert-newline".to_string(), Box::new(InsertNewline));
    registry.insert("insert-tab".to_string(), Box::new(InsertTab));
    registry.insert(
        "delete-previous-character".to_string(),
        Box::new(DeleteBackwardChar),
    );
    registry.insert(
        "delete-next-character".to_string(),
        Box::new(DeleteForwardChar),
    );

    app.command_registry = registry;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::menu::{MenuBar, MenuItem};

    #[test]
    fn test_menu_commands_are_registered() {
        let mut app = EditorApp::new();
        register_all(&mut app);
        for menu in &MenuBar::new().menus {
            for item in &menu.items {
                if let MenuItem::Action { command, .. } = item {
                    assert!(
                        app.command_registry.contains_key(*command),
                        "menu command {} has no implementation",
                        command
                    );
                }
            }
        }
    }

    #[test]
    fn test_default_bindings_are_registered() {
        let mut app = EditorApp::new();
        register_all(&mut app);
        let mut config = crate::config::Config::default();
        crate::user_config::configure(&mut config);
        for command in config.keybindings.values() {
            assert!(
                app.command_registry.contains_key(command),
                "binding to unknown command {}",
                command
            );
        }
    }
}
