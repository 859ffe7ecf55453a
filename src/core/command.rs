//! Command trait for everything a key binding can trigger.
//!
//! Commands are looked up by name in `AppState::command_registry` and run by
//! the dispatcher; they never touch the terminal.

use crate::core::app::AppState;
use crate::core::dispatcher::DispatchResult;

/// A named action against the application state.
///
/// `count` is a repetition count; commands that have no meaningful
/// repetition ignore it.
pub trait Command: Send + Sync + CloneCommand {
    fn execute(&self, app: &mut AppState, count: usize) -> DispatchResult;
}

/// Helper trait for cloning boxed commands
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
