//! `codelab viz`: replay a visualization payload in the terminal.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use super::{message_line, validate_file_path};
use crate::api::{VisualizationPayload, parse_visualization};
use crate::config::Config;
use crate::core::app::AppState;
use crate::core::dispatcher::DispatchResult;
use crate::core::prompt::handle_key;
use crate::core::visualizer::ReplayOutcome;
use crate::error::RunError;
use crate::terminal::events::{AppEvent, EventHandler};
use crate::terminal::raw::RawMode;
use crate::terminal::render::{Renderer, VisualizerView};
use crate::terminal::theme::Theme;

/// How long to wait for a key before checking the playback clock again
const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Read and decode a payload file
pub fn load_payload(path: &Path) -> Result<VisualizationPayload, RunError> {
    let path = validate_file_path(path)?;
    let json = fs::read_to_string(&path)?;
    Ok(parse_visualization(&json)?)
}

/// Print every frame from step 0 through completion.
///
/// Returns the number of frames written.
pub fn run_headless<W: Write>(
    payload: VisualizationPayload,
    config: &Config,
    out: &mut W,
) -> Result<usize, RunError> {
    let mut app = AppState::with_config(config.clone());
    app.start_visualization(payload.kind, payload.data);
    let theme = Theme::default();
    let bar_width = config.bar_width();

    let mut frames = 0;
    loop {
        if let Some(state) = app.visualization.as_ref() {
            if frames > 0 {
                writeln!(out)?;
            }
            write!(out, "{}", VisualizerView::frame(state, &theme, bar_width).plain_text())?;
            frames += 1;
        }
        match app.advance() {
            ReplayOutcome::Completed => continue,
            ReplayOutcome::Unchanged => break,
            _ => {}
        }
    }
    out.flush()?;
    Ok(frames)
}

/// Interactive replay until an `exit` command.
pub fn run_interactive(payload: VisualizationPayload, config: &Config) -> Result<(), RunError> {
    let mut app = AppState::initialize_with_config(config.clone());
    app.start_visualization(payload.kind, payload.data);

    let _raw = RawMode::new()?;
    let mut stdout = io::stdout();
    let mut events = EventHandler::new();
    let mut renderer = Renderer::new(Theme::default());
    let bar_width = config.bar_width();
    let mut shown_line: Option<String> = None;

    loop {
        app.tick();

        if let Some(state) = app.visualization.as_ref() {
            let frame = VisualizerView::frame(state, &renderer.theme, bar_width);
            let line = message_line(&app);
            if shown_line != line {
                renderer.invalidate();
            }
            if renderer.render_if_changed(&mut stdout, &frame, state.revision())? {
                if let Some(text) = line.as_deref() {
                    renderer.render_message(&mut stdout, frame.lines.len() as u16 + 1, text)?;
                }
                shown_line = line;
            }
        } else {
            break;
        }

        if !events.poll(POLL_INTERVAL)? {
            continue;
        }
        match events.read()? {
            AppEvent::Key(key) => {
                if app.prompt.is_none() {
                    app.message = None;
                }
                match handle_key(&mut app, &key) {
                    DispatchResult::Exit => break,
                    DispatchResult::Info(message) => app.set_message(message),
                    DispatchResult::Redraw => renderer.invalidate(),
                    _ => {}
                }
            }
            AppEvent::Resize(_, _) => renderer.invalidate(),
            AppEvent::None => {}
        }
    }
    Ok(())
}
