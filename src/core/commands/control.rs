use crate::core::app::EditorApp;
/// Application control commands
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Exit immediately; unsaved changes are discarded without asking
#[derive(Clone)]
pub struct Exit;

impl Command for Exit {
    fn execute(&self, _app: &mut EditorApp, _count: usize) -> DispatchResult {
        DispatchResult::Exit
    }
}

/// Open the first menu in the menu bar
#[derive(Clone)]
pub struct MenuOpen;

impl Command for MenuOpen {
    fn execute(&self, app: &mut EditorApp, _count: usize) -> DispatchResult {
        app.menu_bar.open_menu(0);
        DispatchResult::Success
    }
}
