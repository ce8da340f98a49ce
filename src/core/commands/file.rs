//! File commands: both hand off to the file dialog

use crate::core::app::EditorApp;
use crate::core::command::Command;
use crate::core::dispatcher::{DispatchResult, InputAction};

/// Replace the buffer with a chosen file (prompts)
#[derive(Clone)]
pub struct OpenFile;

impl Command for OpenFile {
    fn execute(&self, _app: &mut EditorApp, _count: usize) -> DispatchResult {
        DispatchResult::NeedsInput(InputAction::OpenFile)
    }
}

/// Write the buffer to a chosen file (prompts every time)
#[derive(Clone)]
pub struct SaveFile;

impl Command for SaveFile {
    fn execute(&self, _app: &mut EditorApp, _count: usize) -> DispatchResult {
        DispatchResult::NeedsInput(InputAction::SaveFile)
    }
}
