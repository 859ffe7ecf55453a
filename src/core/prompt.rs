//! Minibuffer prompt for commands that need typed input.
//!
//! A command that returns `NeedsInput` opens a prompt on the app state.
//! Key presses then edit the prompt until Enter hands the text to
//! `complete_input`, or Esc drops it.

use crate::core::app::AppState;
use crate::core::dispatcher::{DispatchResult, InputAction, complete_input, dispatch};

/// What a key press did to the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Still editing
    Continue,
    /// Enter pressed with this text
    Confirmed(String),
    /// Prompt dismissed
    Cancelled,
}

/// Text being typed for a pending command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub prompt: String,
    pub input: String,
    /// Byte offset into `input`
    pub cursor: usize,
    pub action: InputAction,
}

impl PromptState {
    pub fn new(prompt: impl Into<String>, action: InputAction) -> Self {
        Self {
            prompt: prompt.into(),
            input: String::new(),
            cursor: 0,
            action,
        }
    }

    /// Process a key, named the way key bindings name it
    pub fn handle_key(&mut self, key: &str) -> PromptResult {
        match key {
            "Enter" => return PromptResult::Confirmed(self.input.clone()),
            "Esc" | "^G" | "^C" => return PromptResult::Cancelled,
            "Backspace" => self.delete_backward(),
            "Left" => self.cursor_left(),
            "Right" => self.cursor_right(),
            "Home" | "^A" => self.cursor = 0,
            "End" | "^E" => self.cursor = self.input.len(),
            "Space" => self.insert_char(' '),
            "Tab" => self.insert_char('\t'),
            _ => {
                let mut chars = key.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    self.insert_char(ch);
                }
            }
        }
        PromptResult::Continue
    }

    pub fn insert_char(&mut self, ch: char) {
        self.input.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn delete_backward(&mut self) {
        if let Some(prev) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.input.remove(self.cursor);
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    /// Prompt label followed by the typed text
    pub fn line(&self) -> String {
        format!("{}{}", self.prompt, self.input)
    }
}

/// Route one key press: into the open prompt if there is one, otherwise
/// through the key bindings.
///
/// A command asking for input opens a prompt and reports `Redraw`.
pub fn handle_key(app: &mut AppState, key: &str) -> DispatchResult {
    if let Some(prompt) = app.prompt.as_mut() {
        let action = prompt.action;
        return match prompt.handle_key(key) {
            PromptResult::Continue => DispatchResult::Redraw,
            PromptResult::Cancelled => {
                app.prompt = None;
                DispatchResult::Info("Cancelled".to_string())
            }
            PromptResult::Confirmed(text) => {
                app.prompt = None;
                match complete_input(app, action, &text) {
                    DispatchResult::Success => DispatchResult::Redraw,
                    other => other,
                }
            }
        };
    }

    let Some(command) = app.config.command_for(key).map(str::to_string) else {
        return DispatchResult::NotHandled;
    };
    match dispatch(app, &command, 1) {
        DispatchResult::NeedsInput { prompt, action } => {
            tracing::trace!(command = %command, "prompt opened");
            app.prompt = Some(PromptState::new(prompt, action));
            DispatchResult::Redraw
        }
        other => other,
    }
}
