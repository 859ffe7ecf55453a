//! Step replay engine.
//!
//! A `ReplayState` walks a cursor over a fixed list of steps. Moving forward
//! applies one step (snapshot + transient marks); moving back recomputes the
//! array from the original and the snapshots only, so highlights of the step
//! being undone are not restored.
//!
//! Invariant: `0 <= current_step <= steps.len()`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::clock::ScheduledTask;
use super::marks::{ElementMark, MarkSet};
use super::step::{Step, Value};

/// Which family of algorithm is being replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationKind {
    Sorting,
    Searching,
}

impl VisualizationKind {
    /// Playback cadence used when configuration does not override it
    pub fn default_interval(self) -> Duration {
        match self {
            VisualizationKind::Sorting => Duration::from_millis(1000),
            VisualizationKind::Searching => Duration::from_millis(1200),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisualizationKind::Sorting => "sorting",
            VisualizationKind::Searching => "searching",
        }
    }

    /// Mark applied to every element when the replay completes
    fn completion_mark(self) -> ElementMark {
        match self {
            VisualizationKind::Sorting => ElementMark::Sorted,
            VisualizationKind::Searching => ElementMark::Found,
        }
    }
}

/// What a transition changed, i.e. how much the view has to redraw.
///
/// Ordered from least to most work so outcomes can be merged with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReplayOutcome {
    /// Nothing changed
    Unchanged,
    /// Only playing/paused state changed
    Status,
    /// Transient marks changed, array contents did not
    Marks,
    /// Array contents were replaced
    Full,
    /// The replay just completed
    Completed,
}

/// Inputs to the replay state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayEvent {
    Advance,
    Retreat,
    /// Start playback at the given clock time
    Play(Duration),
    /// Clock time observed by the owner's event loop
    Tick(Duration),
    Pause,
    Reset,
}

#[derive(Debug, Clone)]
pub struct ReplayState {
    pub kind: VisualizationKind,
    pub algorithm: Option<String>,
    pub target: Option<Value>,
    array: Vec<Value>,
    original_array: Vec<Value>,
    steps: Vec<Step>,
    current_step: usize,
    marks: MarkSet,
    /// Step whose marks are on screen, if any
    shown_step: Option<usize>,
    completed: bool,
    interval: Duration,
    /// Playback handle; `Some` while playing
    task: Option<ScheduledTask>,
    revision: u64,
}

impl ReplayState {
    pub fn new(kind: VisualizationKind, array: Vec<Value>, steps: Vec<Step>) -> Self {
        Self {
            kind,
            algorithm: None,
            target: None,
            marks: MarkSet::new(array.len()),
            original_array: array.clone(),
            array,
            steps,
            current_step: 0,
            shown_step: None,
            completed: false,
            interval: kind.default_interval(),
            task: None,
            revision: 0,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Option<String>) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_target(mut self, target: Option<Value>) -> Self {
        self.target = target;
        self
    }

    // ==================== Accessors ====================

    pub fn array(&self) -> &[Value] {
        &self.array
    }

    pub fn original_array(&self) -> &[Value] {
        &self.original_array
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    pub fn is_playing(&self) -> bool {
        self.task.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn task(&self) -> Option<&ScheduledTask> {
        self.task.as_ref()
    }

    /// Bumped on every visible change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the UI should still offer step-forward and play
    pub fn can_advance(&self) -> bool {
        !self.completed
    }

    pub fn can_retreat(&self) -> bool {
        self.current_step > 0
    }

    /// Caption for the frame on screen
    pub fn caption(&self) -> Option<String> {
        if self.completed {
            return Some(match self.kind {
                VisualizationKind::Sorting => "Array is sorted".to_string(),
                VisualizationKind::Searching => "Search complete".to_string(),
            });
        }
        self.shown_step
            .and_then(|i| self.steps.get(i))
            .map(Step::describe)
    }

    // ==================== Transitions ====================

    /// Apply the next step, or complete the replay if none is left.
    pub fn advance(&mut self) -> ReplayOutcome {
        if self.current_step >= self.steps.len() {
            if self.completed {
                return ReplayOutcome::Unchanged;
            }
            self.completed = true;
            self.marks = MarkSet::all(self.array.len(), self.kind.completion_mark());
            self.shown_step = None;
            self.bump();
            tracing::info!(
                kind = self.kind.label(),
                steps = self.steps.len(),
                "visualization complete"
            );
            return ReplayOutcome::Completed;
        }

        let step = &self.steps[self.current_step];
        let mut outcome = ReplayOutcome::Marks;
        if let Some(snapshot) = step.snapshot() {
            self.array = snapshot.to_vec();
            outcome = ReplayOutcome::Full;
        }
        self.marks = MarkSet::for_step(step, self.array.len());
        self.shown_step = Some(self.current_step);
        self.current_step += 1;
        self.bump();
        outcome
    }

    /// Step the cursor back by one and rebuild the array from snapshots.
    pub fn retreat(&mut self) -> ReplayOutcome {
        if self.current_step == 0 {
            return ReplayOutcome::Unchanged;
        }
        self.current_step -= 1;
        self.array = self.steps[..self.current_step]
            .iter()
            .rev()
            .find_map(Step::snapshot)
            .map(<[Value]>::to_vec)
            .unwrap_or_else(|| self.original_array.clone());
        self.marks = MarkSet::new(self.array.len());
        self.shown_step = None;
        self.completed = false;
        self.bump();
        ReplayOutcome::Full
    }

    /// Start playback; the first tick is one interval after `now`.
    ///
    /// A completed replay stays paused until `reset` or `retreat`.
    pub fn play(&mut self, now: Duration) -> ReplayOutcome {
        if self.task.is_some() || self.completed {
            return ReplayOutcome::Unchanged;
        }
        self.task = Some(ScheduledTask::every(self.interval, now));
        self.bump();
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "playback started");
        ReplayOutcome::Status
    }

    /// Run every playback tick that became due by `now`.
    ///
    /// Each tick advances once. The tick that finds the cursor already at
    /// the end completes the replay and stops playback.
    pub fn tick(&mut self, now: Duration) -> ReplayOutcome {
        let due = match self.task.as_mut() {
            Some(task) => task.due_ticks(now),
            None => return ReplayOutcome::Unchanged,
        };

        let mut outcome = ReplayOutcome::Unchanged;
        for _ in 0..due {
            let at_end = self.current_step >= self.steps.len();
            outcome = outcome.max(self.advance());
            if at_end {
                outcome = outcome.max(self.pause());
                break;
            }
        }
        outcome
    }

    /// Cancel playback. Idempotent.
    pub fn pause(&mut self) -> ReplayOutcome {
        if self.task.take().is_none() {
            return ReplayOutcome::Unchanged;
        }
        self.bump();
        tracing::debug!(step = self.current_step, "playback paused");
        ReplayOutcome::Status
    }

    /// Stop playback and return to the original array at step 0.
    pub fn reset(&mut self) -> ReplayOutcome {
        self.pause();
        self.current_step = 0;
        self.array = self.original_array.clone();
        self.marks = MarkSet::new(self.array.len());
        self.shown_step = None;
        self.completed = false;
        self.bump();
        ReplayOutcome::Full
    }

    /// Dispatch an event to the matching transition
    pub fn handle(&mut self, event: ReplayEvent) -> ReplayOutcome {
        match event {
            ReplayEvent::Advance => self.advance(),
            ReplayEvent::Retreat => self.retreat(),
            ReplayEvent::Play(now) => self.play(now),
            ReplayEvent::Tick(now) => self.tick(now),
            ReplayEvent::Pause => self.pause(),
            ReplayEvent::Reset => self.reset(),
        }
    }

    /// `(state, event) -> state` form of `handle`
    pub fn apply(mut self, event: ReplayEvent) -> Self {
        self.handle(event);
        self
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
