// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;
use std::time::Duration;

use crate::core::search::SearchOptions;
use crate::core::visualizer::VisualizationKind;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Config {
    /// Bind a key name to a command
    pub fn bind(&mut self, key: &str, command: &str) {
        self.keybindings
            .insert(key.to_string(), command.to_string());
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Command bound to a key name, if any
    pub fn command_for(&self, key: &str) -> Option<&str> {
        self.keybindings.get(key).map(String::as_str)
    }

    /// Playback interval for a visualization kind
    pub fn interval_for(&self, kind: VisualizationKind) -> Duration {
        let key = match kind {
            VisualizationKind::Sorting => "sorting_interval_ms",
            VisualizationKind::Searching => "searching_interval_ms",
        };
        match self.get_int(key) {
            Some(ms) if ms > 0 => Duration::from_millis(ms as u64),
            _ => kind.default_interval(),
        }
    }

    /// Default search flags
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            case_sensitive: self.get_bool("search_case_sensitive").unwrap_or(false),
            whole_word: self.get_bool("search_whole_word").unwrap_or(false),
            use_regex: self.get_bool("search_use_regex").unwrap_or(false),
        }
    }

    /// Width in cells of the longest bar in the visualizer
    pub fn bar_width(&self) -> usize {
        match self.get_int("bar_width") {
            Some(w) if w > 0 => w as usize,
            _ => 40,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}
