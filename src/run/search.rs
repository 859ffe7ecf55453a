//! `codelab search`: search one file, list matches or replace them.
//! `codelab find`: the same engine behind a terminal screen.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crossterm::terminal;
use tempfile::NamedTempFile;

use super::{message_line, validate_file_path};
use crate::cli::{FindArgs, SearchArgs};
use crate::config::Config;
use crate::core::app::AppState;
use crate::core::dispatcher::DispatchResult;
use crate::core::prompt::handle_key;
use crate::error::RunError;
use crate::terminal::events::{AppEvent, EventHandler};
use crate::terminal::raw::RawMode;
use crate::terminal::render::{Frame, Renderer, SearchView, Span};
use crate::terminal::theme::Theme;

/// Nothing animates on the search screen, so key waits can be long
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the search subcommand, writing results to `out`.
///
/// Returns the number of matches found before any replacement.
pub fn run_search_mode<W: Write>(
    args: &SearchArgs,
    config: &Config,
    out: &mut W,
) -> Result<usize, RunError> {
    let path = validate_file_path(&args.file)?;
    let content = fs::read_to_string(&path)?;
    let name = display_name(&path);

    let mut app = AppState::with_config(config.clone());
    app.upload_file(&name, &content)?;
    let count = app.search(&args.term, config.search_options())?;

    let Some(replacement) = args.replace.as_deref() else {
        if let Some(session) = app.search.as_ref() {
            for m in &session.matches {
                let column = m.line_content[..m.column_start].chars().count() + 1;
                writeln!(out, "{}:{}:{}: {}", name, m.line_number, column, m.line_content)?;
            }
        }
        out.flush()?;
        return Ok(count);
    };

    if args.diff {
        if let Some(preview) = app.replace_all_preview(replacement) {
            write!(out, "{}", preview.render())?;
        }
        out.flush()?;
        return Ok(count);
    }

    app.replace_all(replacement);
    let replaced = app
        .active_buffer()
        .map(|buffer| buffer.to_string())
        .unwrap_or_default();

    if args.in_place {
        if count > 0 {
            write_in_place(&path, &replaced)?;
        }
        tracing::info!(file = %path.display(), count, "replaced in place");
    } else {
        write!(out, "{}", replaced)?;
        out.flush()?;
    }
    Ok(count)
}

/// Interactive search over one file until an `exit` command.
///
/// With `--write`, an edited buffer is saved on exit. Returns whether the
/// file was written.
pub fn run_search_interactive(args: &FindArgs, config: &Config) -> Result<bool, RunError> {
    let path = validate_file_path(&args.file)?;
    let content = fs::read_to_string(&path)?;
    let name = display_name(&path);

    let mut app = AppState::initialize_with_config(config.clone());
    app.upload_file(&name, &content)?;
    if let Some(term) = args.term.as_deref() {
        // Failures are left on the message line
        if let Err(e) = app.search(term, config.search_options()) {
            tracing::debug!(%e, "initial search failed");
        }
    }

    {
        let _raw = RawMode::new()?;
        let mut stdout = io::stdout();
        let mut events = EventHandler::new();
        let renderer = Renderer::new(Theme::default());
        let mut dirty = true;

        loop {
            if dirty {
                let (cols, rows) = terminal::size()?;
                let body_rows = rows.saturating_sub(1);
                let frame = search_screen(&app, &renderer.theme, cols as usize, body_rows as usize);
                renderer.render(&mut stdout, &frame)?;
                if let Some(line) = message_line(&app) {
                    renderer.render_message(&mut stdout, body_rows, &line)?;
                }
                dirty = false;
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
                        _ => {}
                    }
                    dirty = true;
                }
                AppEvent::Resize(_, _) => dirty = true,
                AppEvent::None => {}
            }
        }
    }

    let edited = app
        .active_buffer()
        .filter(|buffer| buffer.modified)
        .map(|buffer| buffer.to_string());
    match edited {
        Some(text) if args.write => {
            write_in_place(&path, &text)?;
            tracing::info!(file = %path.display(), "saved replacements");
            Ok(true)
        }
        Some(_) => {
            tracing::info!(file = %path.display(), "replacements discarded, no --write");
            Ok(false)
        }
        None => Ok(false),
    }
}

/// The `find` screen: file name and a hint before the first search, then
/// the match list scrolled to keep the current match in view.
pub fn search_screen(app: &AppState, theme: &Theme, width: usize, rows: usize) -> Frame {
    let Some(session) = app.search.as_ref() else {
        let name = app.active_file().map_or("", |(name, _)| name);
        let mut frame = Frame::default();
        frame.push(Span::fg(name, theme.fg()).bold());
        frame.push(Span::fg("Press / to search, q to quit", theme.dim()));
        return frame.window(0, 0, rows);
    };
    SearchView::frame(session, theme, width).window(1, session.current + 1, rows)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Replace `path` with `content` via a temp file in the same directory
fn write_in_place(path: &Path, content: &str) -> Result<(), RunError> {
    let parent = path
        .parent()
        .ok_or_else(|| RunError::InvalidPath("Invalid file path".to_string()))?;

    let temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
    }
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| RunError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    fn args(file: &Path, term: &str) -> SearchArgs {
        SearchArgs {
            file: file.to_path_buf(),
            term: term.to_string(),
            case_sensitive: false,
            whole_word: false,
            regex: false,
            replace: None,
            in_place: false,
            diff: false,
        }
    }

    fn temp_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_lists_matches() {
        let file = temp_with("foo = 1\nbar = foo\n");
        let mut out = Vec::new();
        let count = run_search_mode(&args(file.path(), "foo"), &Config::default(), &mut out).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(":1:1: foo = 1"));
        assert!(lines[1].ends_with(":2:7: bar = foo"));
    }

    #[test]
    fn test_empty_term_is_an_error() {
        let file = temp_with("abc");
        let mut out = Vec::new();
        let err = run_search_mode(&args(file.path(), ""), &Config::default(), &mut out).unwrap_err();
        assert!(matches!(err, RunError::Search(SearchError::EmptyQuery)));
    }

    #[test]
    fn test_replace_to_stdout() {
        let file = temp_with("a-b-c");
        let mut a = args(file.path(), "-");
        a.replace = Some("+".to_string());
        let mut out = Vec::new();
        run_search_mode(&a, &Config::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a+b+c");
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "a-b-c");
    }

    #[test]
    fn test_replace_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.py");
        fs::write(&path, "total = total + 1\n").unwrap();

        let mut a = args(&path, "total");
        a.replace = Some("count".to_string());
        a.in_place = true;
        let mut out = Vec::new();
        assert_eq!(run_search_mode(&a, &Config::default(), &mut out).unwrap(), 2);
        assert!(out.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "count = count + 1\n");
    }

    #[test]
    fn test_diff_preview() {
        let file = temp_with("keep\nold line\nkeep\n");
        let mut a = args(file.path(), "old");
        a.replace = Some("new".to_string());
        a.diff = true;
        let mut out = Vec::new();
        run_search_mode(&a, &Config::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("-old line"));
        assert!(text.contains("+new line"));
        assert!(!text.contains("keep"));
    }

    #[test]
    fn test_search_screen_follows_current_match() {
        let mut config = Config::default();
        crate::user_config::configure(&mut config);
        let mut app = AppState::initialize_with_config(config);
        let content: String = (0..20).map(|i| format!("hit {}\n", i)).collect();
        app.create_file("log.txt", &content).unwrap();
        let theme = Theme::dark();

        let hint = search_screen(&app, &theme, 80, 10).plain_text();
        assert_eq!(hint, "log.txt\nPress / to search, q to quit\n");

        app.search("hit", Default::default()).unwrap();
        for _ in 0..12 {
            app.search_next();
        }
        let frame = search_screen(&app, &theme, 80, 5);
        assert_eq!(frame.lines.len(), 5);
        assert!(frame.lines[0].text().starts_with("Search: hit  13 of 20 matches"));
        // Current match is the last visible row
        assert!(frame.lines[4].text().ends_with("hit 12"));
        assert!(frame.lines[1].text().ends_with("hit 9"));
    }

    #[test]
    fn test_options_come_from_config() {
        let file = temp_with("Foo foo");
        let mut config = Config::default();
        config.set("search_case_sensitive", true);
        let mut out = Vec::new();
        assert_eq!(run_search_mode(&args(file.path(), "foo"), &config, &mut out).unwrap(), 1);
    }
}
