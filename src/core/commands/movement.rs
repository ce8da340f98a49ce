use crate::core::app::EditorApp;
/// Cursor movement commands
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Move cursor forward by character(s)
#[derive(Clone)]
pub struct ForwardChar;

impl Command for ForwardChar {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            app.window.move_forward(&app.buffer);
        }
        DispatchResult::Success
    }
}

/// Move cursor backward by character(s)
#[derive(Clone)]
pub struct BackwardChar;

impl Command for BackwardChar {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            if !app.window.move_backward(&app.buffer) {
                break;
            }
        }
        DispatchResult::Success
    }
}

/// Move cursor down by line(s)
#[derive(Clone)]
pub struct NextLine;

impl Command for NextLine {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            app.window.move_down(&app.buffer);
        }
        DispatchResult::Success
    }
}

/// Move cursor up by line(s)
#[derive(Clone)]
pub struct PreviousLine;

impl Command for PreviousLine {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            app.window.move_up(&app.buffer);
        }
        DispatchResult::Success
    }
}

#[derive(Clone)]
pub struct BeginningOfLine;

impl Command for BeginningOfLine {
    fn execute(&self, app: &mut EditorApp, _count: usize) -> DispatchResult {
        app.window.beginning_of_line(&app.buffer);
        DispatchResult::Success
    }
}

#[derive(Clone)]
pub struct EndOfLine;

impl Command for EndOfLine {
    fn execute(&self, app: &mut EditorApp, _count: usize) -> DispatchResult {
        app.window.end_of_line(&app.buffer);
        DispatchResult::Success
    }
}

/// Page down
#[derive(Clone)]
pub struct ForwardPage;

impl Command for ForwardPage {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            app.window.page_down(&app.buffer);
        }
        DispatchResult::Success
    }
}

/// Page up
#[derive(Clone)]
pub struct BackwardPage;

impl Command for BackwardPage {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult {
        for _ in 0..count {
            app.window.page_up(&app.buffer);
        }
        DispatchResult::Success
    }
}
