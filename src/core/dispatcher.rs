use crate::core::app::AppState;

/// Action waiting on text typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Search the active file for the entered term
    Search,
    /// Replace the current match with the entered text
    ReplaceCurrent,
    /// Replace every match with the entered text
    ReplaceAll,
}

/// Result of command dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// Command executed successfully
    Success,
    /// Command not found/handled
    NotHandled,
    /// Exit requested
    Exit,
    /// Command needs user input before completing
    NeedsInput { prompt: String, action: InputAction },
    /// Informational message to display
    Info(String),
    /// Force full display redraw
    Redraw,
}

/// Maximum nesting of dispatch calls
const MAX_DISPATCH_DEPTH: usize = 64;

/// Look `command_name` up in the registry and run it with repeat `count`.
pub fn dispatch(app: &mut AppState, command_name: &str, count: usize) -> DispatchResult {
    if app.dispatch_depth > MAX_DISPATCH_DEPTH {
        return DispatchResult::Info("Command recursion limit exceeded".to_string());
    }
    app.dispatch_depth += 1;

    let result = match app.command_registry.get(command_name).cloned() {
        Some(command) => {
            tracing::trace!(command = command_name, count, "dispatch");
            command.execute(app, count)
        }
        None => {
            tracing::debug!(command = command_name, "command not found in registry");
            DispatchResult::NotHandled
        }
    };

    app.dispatch_depth -= 1;
    result
}

/// Finish a command that returned `NeedsInput`.
pub fn complete_input(app: &mut AppState, action: InputAction, text: &str) -> DispatchResult {
    match action {
        InputAction::Search => {
            let options = app.search_options;
            match app.search(text, options) {
                Ok(_) => DispatchResult::Success,
                Err(e) => DispatchResult::Info(e.to_string()),
            }
        }
        InputAction::ReplaceCurrent => {
            if app.replace_current(text) {
                DispatchResult::Success
            } else {
                DispatchResult::Info("No match to replace".to_string())
            }
        }
        InputAction::ReplaceAll => match app.replace_all(text) {
            0 => DispatchResult::Info("No match to replace".to_string()),
            _ => DispatchResult::Success,
        },
    }
}
