//! Command trait.
//!
//! Every action the editor can perform (from a key binding or a menu item) is a
//! named `Command` in the registry held by `EditorApp`.

use crate::core::app::EditorApp;
use crate::core::dispatcher::DispatchResult;

/// An editor command.
///
/// `count` is a repetition count; commands where repeating makes no sense
/// ignore it.
pub trait Command: Send + Sync + CloneCommand {
    fn execute(&self, app: &mut EditorApp, count: usize) -> DispatchResult;
}

/// Helper trait for cloning boxed commands.
/// Implemented for every `Command + Clone`.
pub trait CloneCommand {
    fn clone_box(&self) -> Box<dyn Command>;
}

impl<T> CloneCommand for T
where
    T: 'static + Command + Clone,
{
    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Box<dyn Command> {
        self.as_ref().clone_box()
    }
}
