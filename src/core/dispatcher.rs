use tracing::debug;

use crate::core::app::EditorApp;

/// What a command needs from the user before it can finish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Choose a file to load into the buffer
    OpenFile,
    /// Choose a file to write the buffer to
    SaveFile,
}

/// Result of command dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    Success,
    /// Command not found/handled
    NotHandled,
    /// Leave the event loop
    Exit,
    /// Command needs a file chosen in the dialog before completing
    NeedsInput(InputAction),
    /// Informational message for the status line
    Info(String),
}

/// Run a command by name, or insert a character.
///
/// Character insertion is handled here directly; named commands are looked
/// up in the registry. The result is returned untouched: applying it
/// (opening the dialog, leaving the loop) is `EditorApp::apply_result`'s job.
pub fn dispatch(
    app: &mut EditorApp,
    command_name: Option<&str>,
    insert_char: Option<char>,
    count: usize,
) -> DispatchResult {
    if let Some(c) = insert_char {
        for _ in 0..count {
            app.window.insert_char(&mut app.buffer, c);
        }
        return DispatchResult::Success;
    }

    let Some(command_name) = command_name else {
        return DispatchResult::NotHandled;
    };

    match app.command_registry.get(command_name).cloned() {
        Some(command) => command.execute(app, count),
        None => {
            debug!(command = command_name, "command not found in registry");
            DispatchResult::NotHandled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_app() -> EditorApp {
        let mut app = EditorApp::new();
        crate::core::commands::register_all(&mut app);
        app
    }

    #[test]
    fn test_dispatch_forward_char() {
        let mut app = setup_test_app();
        app.buffer.insert(0, "abc");
        let result = dispatch(&mut app, Some("forward-character"), None, 2);
        assert_eq!(result, DispatchResult::Success);
        assert_eq!(app.window.cursor_x, 2);
    }

    #[test]
    fn test_dispatch_insert_char() {
        let mut app = setup_test_app();
        let result = dispatch(&mut app, None, Some('x'), 3);
        assert_eq!(result, DispatchResult::Success);
        assert_eq!(app.buffer.to_string(), "xxx");
    }

    #[test]
    fn test_dispatch_file_commands_need_input() {
        let mut app = setup_test_app();
        assert_eq!(
            dispatch(&mut app, Some("open-file"), None, 1),
            DispatchResult::NeedsInput(InputAction::OpenFile)
        );
        assert_eq!(
            dispatch(&mut app, Some("save-file"), None, 1),
            DispatchResult::NeedsInput(InputAction::SaveFile)
        );
    }

    #[test]
    fn test_dispatch_exit() {
        let mut app = setup_test_app();
        let result = dispatch(&mut app, Some("exit"), None, 1);
        assert_eq!(result, DispatchResult::Exit);
    }

    #[test]
    fn test_dispatch_unknown() {
        let mut app = setup_test_app();
        let result = dispatch(&mut app, Some("unknown-command"), None, 1);
        assert_eq!(result, DispatchResult::NotHandled);
        assert_eq!(dispatch(&mut app, None, None, 1), DispatchResult::NotHandled);
    }
}
