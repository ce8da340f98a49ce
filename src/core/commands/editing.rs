use crate::core::app::EditorApp;
/// Basic editing commands (newline, tab, delete)
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Insert newline at cursor position
#[derive(Clone)]
pub struct InsertNewline;

impl Command for InsertNewline {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            app.window.insert_char(&mut app.buffer, '\n');
        }
        DispatchResult::Success
    }
}

/// Insert a literal tab character at cursor position
#[derive(Clone)]
pub struct InsertTab;

impl Command for InsertTab {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            app.window.insert_char(&mut app.buffer, '\t');
        }
        DispatchResult::Success
    }
}

/// Delete character before cursor (Backspace)
#[derive(Clone)]
pub struct DeleteBackwardChar;

impl Command for DeleteBackwardChar {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            app.window.delete_backward(&mut app.buffer);
        }
        DispatchResult::Success
    }
}

/// Delete character at cursor (Delete)
#[derive(Clone)]
pub struct DeleteForwardChar;

impl Command for DeleteForwardChar {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            app.window.delete_forward(&mut app.buffer);
        }
        DispatchResult::Success
    }
}
