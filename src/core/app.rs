//! `AppState`: the root of everything the shell drives. It owns the file
//! tree, open tabs, the active search session and the active visualization,
//! and is the only thing commands get to mutate.

use std::collections::HashMap;
use std::rc::Rc;

use crate::api::VisualizationData;
use crate::config::Config;
use crate::core::buffer::Buffer;
use crate::core::command::Command;
use crate::core::diff::DiffView;
use crate::core::files::{FileRecord, FileStore};
use crate::core::prompt::PromptState;
use crate::core::search::{self, SearchOptions, SearchSession};
use crate::core::tabs::Tabs;
use crate::core::visualizer::{
    Clock, ReplayEvent, ReplayOutcome, ReplayState, SystemClock, VisualizationKind,
};
use crate::error::{FileError, SearchError};

pub struct AppState {
    pub files: FileStore,
    pub tabs: Tabs,
    /// Matches of the last search in the active file
    pub search: Option<SearchSession>,
    /// Flags used by the next search
    pub search_options: SearchOptions,
    /// Visualization on screen, if any
    pub visualization: Option<ReplayState>,
    pub config: Config,
    /// Status/error message to display to user
    pub message: Option<String>,
    /// Prompt collecting input for a command, if one is open
    pub prompt: Option<PromptState>,
    /// Registry of commands by name
    pub command_registry: HashMap<String, Box<dyn Command>>,
    /// Dispatch depth counter for recursion prevention
    pub dispatch_depth: usize,
    clock: Rc<dyn Clock>,
}

impl AppState {
    /// Empty state with the built-in defaults and a wall clock.
    ///
    /// No commands are registered; see `initialize_with_config`.
    pub fn new() -> Self {
        let mut config = Config::default();
        crate::user_config::configure(&mut config);
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            files: FileStore::new(),
            tabs: Tabs::new(),
            search: None,
            search_options: config.search_options(),
            visualization: None,
            config,
            message: None,
            prompt: None,
            command_registry: HashMap::new(),
            dispatch_depth: 0,
            clock: Rc::new(SystemClock::new()),
        }
    }

    /// Build the state the binaries run with: config applied and every
    /// command registered.
    pub fn initialize_with_config(config: Config) -> Self {
        let mut app = Self::with_config(config);
        crate::core::commands::register_all(&mut app);
        app
    }

    /// Replace the time source used for playback
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> std::time::Duration {
        self.clock.now()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    // ==================== Files ====================

    /// Create a file and open it in a tab
    pub fn create_file(&mut self, name: &str, content: &str) -> Result<(), FileError> {
        self.files.create(name, content)?;
        self.open_file(name)
    }

    /// Add an uploaded file (replacing one of the same name) and open it
    pub fn upload_file(&mut self, name: &str, content: &str) -> Result<(), FileError> {
        self.files.upload(name, content)?;
        if self.tabs.active() == Some(name) {
            self.search = None;
        }
        self.open_file(name)
    }

    pub fn open_file(&mut self, name: &str) -> Result<(), FileError> {
        if !self.files.contains(name) {
            return Err(FileError::NotFound(name.to_string()));
        }
        if self.tabs.active() != Some(name) {
            self.search = None;
        }
        self.tabs.open(name);
        Ok(())
    }

    pub fn delete_file(&mut self, name: &str) -> Result<(), FileError> {
        self.files.delete(name)?;
        if self.tabs.active() == Some(name) {
            self.search = None;
        }
        self.tabs.close(name);
        Ok(())
    }

    pub fn rename_file(&mut self, old: &str, new: &str) -> Result<(), FileError> {
        self.files.rename(old, new)?;
        self.tabs.rename(old, new);
        Ok(())
    }

    pub fn active_file(&self) -> Option<(&str, &FileRecord)> {
        let name = self.tabs.active()?;
        self.files.get(name).map(|record| (name, record))
    }

    pub fn active_buffer(&self) -> Option<&Buffer> {
        self.active_file().map(|(_, record)| &record.buffer)
    }

    fn active_buffer_mut(&mut self) -> Option<&mut Buffer> {
        let name = self.tabs.active()?;
        self.files.get_mut(name).map(|record| &mut record.buffer)
    }

    /// Apply an edit to the active buffer. Any search session is dropped,
    /// its offsets no longer describe the text.
    pub fn edit_active<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut Buffer),
    {
        let Some(buffer) = self.active_buffer_mut() else {
            return false;
        };
        edit(buffer);
        self.search = None;
        true
    }

    // ==================== Visualization ====================

    /// Replace the current visualization with a fresh one at step 0
    pub fn start_visualization(&mut self, kind: VisualizationKind, data: VisualizationData) {
        if let Some(mut previous) = self.visualization.take() {
            previous.pause();
        }
        tracing::info!(
            kind = kind.label(),
            elements = data.array.len(),
            steps = data.steps.len(),
            "visualization started"
        );
        let state = ReplayState::new(kind, data.array, data.steps)
            .with_interval(self.config.interval_for(kind))
            .with_algorithm(data.algorithm)
            .with_target(data.target);
        self.visualization = Some(state);
    }

    pub fn close_visualization(&mut self) -> bool {
        match self.visualization.take() {
            Some(mut state) => {
                state.pause();
                true
            }
            None => false,
        }
    }

    fn replay(&mut self, event: ReplayEvent) -> ReplayOutcome {
        match self.visualization.as_mut() {
            Some(state) => state.handle(event),
            None => ReplayOutcome::Unchanged,
        }
    }

    pub fn advance(&mut self) -> ReplayOutcome {
        self.replay(ReplayEvent::Advance)
    }

    pub fn retreat(&mut self) -> ReplayOutcome {
        self.replay(ReplayEvent::Retreat)
    }

    pub fn play(&mut self) -> ReplayOutcome {
        let now = self.clock.now();
        self.replay(ReplayEvent::Play(now))
    }

    pub fn pause(&mut self) -> ReplayOutcome {
        self.replay(ReplayEvent::Pause)
    }

    pub fn reset(&mut self) -> ReplayOutcome {
        self.replay(ReplayEvent::Reset)
    }

    /// Run playback ticks that are due on the app clock
    pub fn tick(&mut self) -> ReplayOutcome {
        let now = self.clock.now();
        self.replay(ReplayEvent::Tick(now))
    }

    // ==================== Search ====================

    /// Search the active file and keep the session.
    ///
    /// Returns the match count. Errors and the no-match case are also
    /// left in `message` for the status line.
    pub fn search(&mut self, term: &str, options: SearchOptions) -> Result<usize, SearchError> {
        self.search_options = options;
        self.search = None;

        let session = match self
            .active_buffer()
            .map(|buffer| SearchSession::run(buffer, term, options))
        {
            Some(result) => result,
            None if term.is_empty() => Err(SearchError::EmptyQuery),
            None => {
                self.set_message("No file open");
                return Ok(0);
            }
        };

        match session {
            Ok(session) => {
                let count = session.matches.len();
                self.set_message(session.status_line());
                self.search = Some(session);
                Ok(count)
            }
            Err(e) => {
                self.set_message(e.to_string());
                Err(e)
            }
        }
    }

    /// Re-run the current session's term against the (edited) active buffer
    fn refresh_search(&mut self, term: &str, options: SearchOptions) {
        if let Some(buffer) = self.active_buffer() {
            self.search = SearchSession::run(buffer, term, options).ok();
        }
    }

    pub fn search_next(&mut self) -> bool {
        let Some(session) = self.search.as_mut() else {
            return false;
        };
        let moved = session.next().is_some();
        let status = session.status_line();
        self.set_message(status);
        moved
    }

    pub fn search_previous(&mut self) -> bool {
        let Some(session) = self.search.as_mut() else {
            return false;
        };
        let moved = session.previous().is_some();
        let status = session.status_line();
        self.set_message(status);
        moved
    }

    /// A session exists and still describes the active buffer.
    ///
    /// A refused session is left in place.
    fn can_replace(&self) -> bool {
        let (Some(session), Some(buffer)) = (self.search.as_ref(), self.active_buffer()) else {
            return false;
        };
        if session.is_stale(buffer) {
            tracing::warn!("search results are stale, not replacing");
            return false;
        }
        true
    }

    /// Replace match `index` of the current session, then search again.
    pub fn replace_one(&mut self, index: usize, replacement: &str) -> bool {
        if !self.can_replace() {
            return false;
        }
        let Some(session) = self.search.take() else {
            return false;
        };
        let Some(buffer) = self.active_buffer_mut() else {
            return false;
        };
        let replaced = search::replace_one(buffer, &session.matches, index, replacement);
        self.refresh_search(&session.term, session.options);
        if let Some(fresh) = self.search.as_mut() {
            if !fresh.matches.is_empty() {
                fresh.current = index.min(fresh.matches.len() - 1);
            }
        }
        replaced
    }

    /// Replace the highlighted match
    pub fn replace_current(&mut self, replacement: &str) -> bool {
        match self.search.as_ref() {
            Some(session) if !session.matches.is_empty() => {
                let index = session.current;
                self.replace_one(index, replacement)
            }
            _ => false,
        }
    }

    /// Replace every match of the current session, then search again.
    pub fn replace_all(&mut self, replacement: &str) -> usize {
        if !self.can_replace() {
            return 0;
        }
        let Some(session) = self.search.take() else {
            return 0;
        };
        let Some(buffer) = self.active_buffer_mut() else {
            return 0;
        };
        let count = search::replace_all(buffer, &session.matches, replacement);
        self.set_message(format!("Replaced {} occurrence(s)", count));
        self.refresh_search(&session.term, session.options);
        count
    }

    /// What `replace_all` would do to the active file, without doing it
    pub fn replace_all_preview(&self, replacement: &str) -> Option<DiffView> {
        let session = self.search.as_ref()?;
        let original = self.active_buffer()?.to_string();
        let modified = search::replace_all_in(&original, &session.matches, replacement);
        Some(DiffView::new(original, modified))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
