//! Application control commands

use crate::core::app::AppState;
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Exit application
#[derive(Clone)]
pub struct Exit;

impl Command for Exit {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        app.close_visualization();
        DispatchResult::Exit
    }
}
