use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Terminal events the run loop cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key press, as the name used in key bindings
    Key(String),
    Resize(u16, u16),
    None,
}

#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Check for available events with a timeout
    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    /// Read the next event without blocking
    pub fn read(&mut self) -> io::Result<AppEvent> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(AppEvent::None);
        }
        Ok(match event::read()? {
            Event::Key(key) => key_name(&key).map_or(AppEvent::None, AppEvent::Key),
            Event::Resize(cols, rows) => AppEvent::Resize(cols, rows),
            _ => AppEvent::None,
        })
    }
}

/// Binding name of a key press: "a", "N", "^C", "Space", "Left", ...
///
/// Key releases are ignored.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if ctrl => format!("^{}", c.to_ascii_uppercase()),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => return None,
    };
    Some(name)
}
