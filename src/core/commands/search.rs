//! Search and replace commands

use crate::core::app::AppState;
use crate::core::command::Command;
use crate::core::dispatcher::{DispatchResult, InputAction};

/// Search the active file (prompts)
#[derive(Clone)]
pub struct Search;

impl Command for Search {
    fn execute(&self, _app: &mut AppState, _count: usize) -> DispatchResult {
        DispatchResult::NeedsInput {
            prompt: "Search: ".to_string(),
            action: InputAction::Search,
        }
    }
}

/// Highlight the next match
#[derive(Clone)]
pub struct SearchNextMatch;

impl Command for SearchNextMatch {
    fn execute(&self, app: &mut AppState, count: usize) -> DispatchResult {
        for _ in 0..count.max(1) {
            if !app.search_next() {
                return DispatchResult::Info("No matches found".to_string());
            }
        }
        DispatchResult::Success
    }
}

/// Highlight the previous match
#[derive(Clone)]
pub struct SearchPreviousMatch;

impl Command for SearchPreviousMatch {
    fn execute(&self, app: &mut AppState, count: usize) -> DispatchResult {
        for _ in 0..count.max(1) {
            if !app.search_previous() {
                return DispatchResult::Info("No matches found".to_string());
            }
        }
        DispatchResult::Success
    }
}

fn has_matches(app: &AppState) -> bool {
    app.search.as_ref().is_some_and(|s| !s.matches.is_empty())
}

/// Replace the highlighted match (prompts)
#[derive(Clone)]
pub struct ReplaceCurrent;

impl Command for ReplaceCurrent {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        if !has_matches(app) {
            return DispatchResult::Info("No matches found".to_string());
        }
        DispatchResult::NeedsInput {
            prompt: "Replace with: ".to_string(),
            action: InputAction::ReplaceCurrent,
        }
    }
}

/// Replace every match (prompts)
#[derive(Clone)]
pub struct ReplaceAll;

impl Command for ReplaceAll {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        if !has_matches(app) {
            return DispatchResult::Info("No matches found".to_string());
        }
        DispatchResult::NeedsInput {
            prompt: "Replace all with: ".to_string(),
            action: InputAction::ReplaceAll,
        }
    }
}

fn flag_state(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

/// Flip case sensitivity for the next search
#[derive(Clone)]
pub struct ToggleCaseSensitive;

impl Command for ToggleCaseSensitive {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        app.search_options.case_sensitive = !app.search_options.case_sensitive;
        DispatchResult::Info(format!(
            "Case sensitive: {}",
            flag_state(app.search_options.case_sensitive)
        ))
    }
}

/// Flip whole-word matching for the next search
#[derive(Clone)]
pub struct ToggleWholeWord;

impl Command for ToggleWholeWord {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        app.search_options.whole_word = !app.search_options.whole_word;
        DispatchResult::Info(format!(
            "Whole word: {}",
            flag_state(app.search_options.whole_word)
        ))
    }
}

/// Flip regex mode for the next search
#[derive(Clone)]
pub struct ToggleRegex;

impl Command for ToggleRegex {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        app.search_options.use_regex = !app.search_options.use_regex;
        DispatchResult::Info(format!(
            "Regex: {}",
            flag_state(app.search_options.use_regex)
        ))
    }
}
