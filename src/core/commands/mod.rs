//! Command implementations, grouped by what they act on:
//!
//! - **visualize**: replay stepping and playback (viz-next-step, viz-play, ...)
//! - **search**: search, match navigation, replace and search flags
//! - **control**: application control (exit)
//!
//! All commands implement the [`Command`](crate::core::command::Command) trait.

/// Application control
pub mod control;
/// Search and replace
pub mod search;
/// Visualizer playback
pub mod visualize;

/// Register all commands in the application
pub fn register_all(app: &mut crate::core::app::AppState) {
    use crate::core::command::Command;
    use std::collections::HashMap;

    use self::control::*;
    use self::search::*;
    use self::visualize::*;

    let mut registry: HashMap<String, Box<dyn Command>> = HashMap::new();

    // Visualizer
    registry.insert("viz-next-step".to_string(), Box::new(NextStep));
    registry.insert("viz-previous-step".to_string(), Box::new(PreviousStep));
    registry.insert("viz-play".to_string(), Box::new(Play));
    registry.insert("viz-pause".to_string(), Box::new(Pause));
    registry.insert("viz-toggle-play".to_string(), Box::new(TogglePlay));
    registry.insert("viz-reset".to_string(), Box::new(Reset));
    registry.insert("viz-close".to_string(), Box::new(Close));

    // Search
    registry.insert("search".to_string(), Box::new(Search));
    registry.insert("search-next-match".to_string(), Box::new(SearchNextMatch));
    registry.insert(
        "search-previous-match".to_string(),
        Box::new(SearchPreviousMatch),
    );
    registry.insert("replace-current".to_string(), Box::new(ReplaceCurrent));
    registry.insert("replace-all".to_string(), Box::new(ReplaceAll));
    registry.insert(
        "toggle-case-sensitive".to_string(),
        Box::new(ToggleCaseSensitive),
    );
    registry.insert("toggle-whole-word".to_string(), Box::new(ToggleWholeWord));
    registry.insert("toggle-regex".to_string(), Box::new(ToggleRegex));

    // Control
    registry.insert("exit".to_string(), Box::new(Exit));

    app.command_registry = registry;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::AppState;

    #[test]
    fn test_every_default_binding_is_registered() {
        let mut app = AppState::new();
        register_all(&mut app);
        for command in app.config.keybindings.values() {
            assert!(
                app.command_registry.contains_key(command),
                "unbound command {command}"
            );
        }
    }
}
