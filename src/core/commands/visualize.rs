//! Visualizer stepping and playback commands.
//!
//! Once a replay is complete, stepping forward and play are refused here;
//! the replay engine itself treats them as no-ops.

use crate::core::app::AppState;
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;
use crate::core::visualizer::ReplayOutcome;

const NO_VISUALIZATION: &str = "No visualization open";
const ALREADY_COMPLETE: &str = "Visualization complete, reset to replay";

fn outcome_result(outcome: ReplayOutcome) -> DispatchResult {
    match outcome {
        ReplayOutcome::Full | ReplayOutcome::Completed => DispatchResult::Redraw,
        _ => DispatchResult::Success,
    }
}

/// Refusal for the forward-moving commands, if any applies
fn refuse_forward(app: &AppState) -> Option<DispatchResult> {
    match app.visualization.as_ref() {
        None => Some(DispatchResult::Info(NO_VISUALIZATION.to_string())),
        Some(state) if !state.can_advance() => {
            Some(DispatchResult::Info(ALREADY_COMPLETE.to_string()))
        }
        Some(_) => None,
    }
}

/// Apply the next step
#[derive(Clone)]
pub struct NextStep;

impl Command for NextStep {
    fn execute(&self, app: &mut AppState, count: usize) -> DispatchResult {
        if let Some(refusal) = refuse_forward(app) {
            return refusal;
        }
        let mut outcome = ReplayOutcome::Unchanged;
        for _ in 0..count.max(1) {
            outcome = outcome.max(app.advance());
            if outcome == ReplayOutcome::Completed {
                break;
            }
        }
        outcome_result(outcome)
    }
}

/// Step back
#[derive(Clone)]
pub struct PreviousStep;

impl Command for PreviousStep {
    fn execute(&self, app: &mut AppState, count: usize) -> DispatchResult {
        if app.visualization.is_none() {
            return DispatchResult::Info(NO_VISUALIZATION.to_string());
        }
        let mut outcome = ReplayOutcome::Unchanged;
        for _ in 0..count.max(1) {
            outcome = outcome.max(app.retreat());
        }
        outcome_result(outcome)
    }
}

/// Start automatic playback
#[derive(Clone)]
pub struct Play;

impl Command for Play {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        if let Some(refusal) = refuse_forward(app) {
            return refusal;
        }
        outcome_result(app.play())
    }
}

/// Stop automatic playback
#[derive(Clone)]
pub struct Pause;

impl Command for Pause {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        if app.visualization.is_none() {
            return DispatchResult::Info(NO_VISUALIZATION.to_string());
        }
        outcome_result(app.pause())
    }
}

/// Play if paused, pause if playing
#[derive(Clone)]
pub struct TogglePlay;

impl Command for TogglePlay {
    fn execute(&self, app: &mut AppState, count: usize) -> DispatchResult {
        match app.visualization.as_ref() {
            Some(state) if state.is_playing() => Pause.execute(app, count),
            _ => Play.execute(app, count),
        }
    }
}

/// Back to the original array
#[derive(Clone)]
pub struct Reset;

impl Command for Reset {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        if app.visualization.is_none() {
            return DispatchResult::Info(NO_VISUALIZATION.to_string());
        }
        outcome_result(app.reset())
    }
}

/// Close the visualization panel
#[derive(Clone)]
pub struct Close;

impl Command for Close {
    fn execute(&self, app: &mut AppState, _count: usize) -> DispatchResult {
        if app.close_visualization() {
            DispatchResult::Redraw
        } else {
            DispatchResult::Info(NO_VISUALIZATION.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::VisualizationData;
    use crate::core::dispatcher::dispatch;
    use crate::core::visualizer::{Step, VisualizationKind};

    fn app_with_sort() -> AppState {
        let mut app = AppState::new();
        crate::core::commands::register_all(&mut app);
        app.start_visualization(
            VisualizationKind::Sorting,
            VisualizationData {
                array: vec![2.0, 1.0],
                steps: vec![Step::Swap {
                    indices: [0, 1],
                    array: Some(vec![1.0, 2.0]),
                }],
                algorithm: None,
                target: None,
            },
        );
        app
    }

    #[test]
    fn test_next_step_with_count_stops_at_completion() {
        let mut app = app_with_sort();
        assert_eq!(dispatch(&mut app, "viz-next-step", 10), DispatchResult::Redraw);
        let state = app.visualization.as_ref().unwrap();
        assert!(state.is_completed());
        assert_eq!(state.current_step(), 1);
    }

    #[test]
    fn test_forward_refused_after_completion() {
        let mut app = app_with_sort();
        dispatch(&mut app, "viz-next-step", 2);
        assert_eq!(
            dispatch(&mut app, "viz-next-step", 1),
            DispatchResult::Info(ALREADY_COMPLETE.to_string())
        );
        assert_eq!(
            dispatch(&mut app, "viz-play", 1),
            DispatchResult::Info(ALREADY_COMPLETE.to_string())
        );
        assert_eq!(dispatch(&mut app, "viz-reset", 1), DispatchResult::Redraw);
        assert_eq!(dispatch(&mut app, "viz-next-step", 1), DispatchResult::Redraw);
    }

    #[test]
    fn test_toggle_play() {
        let mut app = app_with_sort();
        dispatch(&mut app, "viz-toggle-play", 1);
        assert!(app.visualization.as_ref().unwrap().is_playing());
        dispatch(&mut app, "viz-toggle-play", 1);
        assert!(!app.visualization.as_ref().unwrap().is_playing());
    }

    #[test]
    fn test_commands_without_visualization() {
        let mut app = AppState::new();
        crate::core::commands::register_all(&mut app);
        for name in ["viz-next-step", "viz-previous-step", "viz-play", "viz-close"] {
            assert_eq!(
                dispatch(&mut app, name, 1),
                DispatchResult::Info(NO_VISUALIZATION.to_string())
            );
        }
    }
}
