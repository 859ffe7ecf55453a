//! Terminal rendering.
//!
//! Views turn model state into a `Frame`: plain styled lines with no
//! terminal I/O, so they can be asserted on in tests. `Renderer` is the only
//! thing that writes escape sequences, using crossterm.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::UnicodeWidthChar;

use crate::core::search::SearchSession;
use crate::core::visualizer::{ReplayState, Value};
use crate::terminal::theme::{Color, Theme};

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: None,
            bg: None,
            bold: false,
        }
    }

    pub fn fg(text: impl Into<String>, color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::plain(text)
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn on(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<Span>,
}

impl StyledLine {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl From<Span> for StyledLine {
    fn from(span: Span) -> Self {
        Self { spans: vec![span] }
    }
}

/// One screenful of styled lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<StyledLine>,
}

impl Frame {
    pub fn push(&mut self, line: impl Into<StyledLine>) {
        self.lines.push(line.into());
    }

    /// Fit the frame into `rows` lines.
    ///
    /// The first `header` lines stay put; the rest scrolls so that line
    /// `focus` is on screen.
    pub fn window(mut self, header: usize, focus: usize, rows: usize) -> Frame {
        if self.lines.len() <= rows {
            return self;
        }
        if rows <= header {
            self.lines.truncate(rows);
            return self;
        }
        let body_rows = rows - header;
        let body = self.lines.split_off(header);
        let focus = focus.saturating_sub(header).min(body.len() - 1);
        let start = (focus + 1).saturating_sub(body_rows);
        self.lines.extend(body.into_iter().skip(start).take(body_rows));
        self
    }

    /// The frame without styling, one line per row
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text());
            out.push('\n');
        }
        out
    }
}

/// Take as much of `text` as fits in `room` display columns and charge it.
///
/// Once something is cut short the room drops to zero, so later pieces of
/// the same line are hidden rather than shown out of place.
fn take_width<'a>(text: &'a str, room: &mut usize) -> &'a str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > *room {
            *room = 0;
            return &text[..idx];
        }
        used += w;
    }
    *room -= used;
    text
}

// ==================== Visualizer ====================

pub struct VisualizerView;

impl VisualizerView {
    /// Header, one bar per element, caption and status line
    pub fn frame(state: &ReplayState, theme: &Theme, bar_width: usize) -> Frame {
        let mut frame = Frame::default();

        let title = match state.algorithm.as_deref() {
            Some(name) => format!("{} ({})", name, state.kind.label()),
            None => format!("{} visualization", state.kind.label()),
        };
        let mut header = vec![Span::fg(title, theme.fg()).bold()];
        if let Some(target) = state.target {
            header.push(Span::fg(format!("  target: {}", target), theme.dim()));
        }
        frame.push(StyledLine::new(header));
        frame.push(Span::plain(""));

        let array = state.array();
        let peak = array.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        for (i, value) in array.iter().enumerate() {
            let mark = state.marks().get(i);
            let mut spans = vec![
                Span::fg(format!("{:>3} ", i), theme.dim()),
                Span::fg(bar(*value, peak, bar_width), theme.mark(mark)),
                Span::plain(format!(" {}", value)),
            ];
            if let Some(mark) = mark {
                spans.push(Span::fg(format!("  {}", mark.class_name()), theme.mark(Some(mark))));
            }
            frame.push(StyledLine::new(spans));
        }

        frame.push(Span::plain(""));
        if let Some(caption) = state.caption() {
            frame.push(Span::fg(caption, theme.fg()));
        } else {
            frame.push(Span::plain(""));
        }

        let status = if state.is_completed() {
            "complete"
        } else if state.is_playing() {
            "playing"
        } else {
            "paused"
        };
        frame.push(
            Span::fg(
                format!(
                    " Step {}/{}  {} ",
                    state.current_step(),
                    state.steps().len(),
                    status
                ),
                theme.status_fg(),
            )
            .on(theme.status_bg()),
        );
        frame
    }
}

/// Bar proportional to `value / peak`; non-zero values get at least one cell
fn bar(value: Value, peak: f64, width: usize) -> String {
    if peak <= 0.0 || value == 0.0 {
        return String::new();
    }
    let cells = ((value.abs() / peak) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width.max(1)))
}

// ==================== Search ====================

pub struct SearchView;

impl SearchView {
    /// Summary line plus one row per match with the hit highlighted
    pub fn frame(session: &SearchSession, theme: &Theme, width: usize) -> Frame {
        let mut frame = Frame::default();
        frame.push(StyledLine::new(vec![
            Span::fg(format!("Search: {}", session.term), theme.fg()).bold(),
            Span::fg(format!("  {}", session.status_line()), theme.dim()),
        ]));

        for (idx, m) in session.matches.iter().enumerate() {
            let column = m.line_content[..m.column_start].chars().count() + 1;
            let gutter = format!("{:>5}:{:<4}", m.line_number, column);
            let mut room = width.saturating_sub(gutter.chars().count());

            let before = &m.line_content[..m.column_start];
            let hit = &m.line_content[m.column_start..m.column_end];
            let after = &m.line_content[m.column_end..];

            let hit_bg = if idx == session.current {
                theme.current_match_bg()
            } else {
                theme.match_bg()
            };

            let before = take_width(before, &mut room);
            let hit = take_width(hit, &mut room);
            let after = take_width(after, &mut room);

            frame.push(StyledLine::new(vec![
                Span::fg(gutter, theme.dim()),
                Span::plain(before),
                Span::fg(hit, theme.bg()).on(hit_bg),
                Span::plain(after),
            ]));
        }
        frame
    }
}

// ==================== Output ====================

/// Writes frames to a terminal, skipping ones already on screen
pub struct Renderer {
    pub theme: Theme,
    last_revision: Option<u64>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            last_revision: None,
        }
    }

    /// Force the next `render_if_changed` to draw
    pub fn invalidate(&mut self) {
        self.last_revision = None;
    }

    /// Draw `frame` unless `revision` is the one drawn last time.
    pub fn render_if_changed<W: Write>(
        &mut self,
        out: &mut W,
        frame: &Frame,
        revision: u64,
    ) -> io::Result<bool> {
        if self.last_revision == Some(revision) {
            return Ok(false);
        }
        self.render(out, frame)?;
        self.last_revision = Some(revision);
        Ok(true)
    }

    /// Clear the screen and draw `frame` from the top-left corner
    pub fn render<W: Write>(&self, out: &mut W, frame: &Frame) -> io::Result<()> {
        queue!(out, cursor::Hide, Clear(ClearType::All))?;
        for (row, line) in frame.lines.iter().enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for span in &line.spans {
                if let Some(fg) = span.fg {
                    queue!(out, SetForegroundColor(fg.into()))?;
                }
                if let Some(bg) = span.bg {
                    queue!(out, SetBackgroundColor(bg.into()))?;
                }
                if span.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                queue!(out, Print(&span.text), SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        out.flush()
    }

    /// Draw the message line below the frame
    pub fn render_message<W: Write>(&self, out: &mut W, row: u16, message: &str) -> io::Result<()> {
        queue!(
            out,
            cursor::MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(self.theme.fg().into()),
            Print(message),
            ResetColor
        )?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::Buffer;
    use crate::core::search::SearchOptions;
    use crate::core::visualizer::{Step, VisualizationKind};

    fn swap_state() -> ReplayState {
        ReplayState::new(
            VisualizationKind::Sorting,
            vec![5.0, 3.0, 1.0],
            vec![Step::Swap {
                indices: [0, 2],
                array: Some(vec![1.0, 3.0, 5.0]),
            }],
        )
    }

    fn numbered(count: usize) -> Frame {
        let mut frame = Frame::default();
        frame.push(Span::plain("head"));
        for i in 0..count {
            frame.push(Span::plain(format!("b{}", i)));
        }
        frame
    }

    #[test]
    fn test_window_scrolls_to_focus() {
        let text = numbered(10).window(1, 8, 4).plain_text();
        assert_eq!(text, "head\nb5\nb6\nb7\n");

        // Focus near the top leaves the first lines in place
        let text = numbered(10).window(1, 1, 4).plain_text();
        assert_eq!(text, "head\nb0\nb1\nb2\n");

        // Already fits
        assert_eq!(numbered(2).window(1, 2, 4).lines.len(), 3);
        // No room beyond the header
        assert_eq!(numbered(5).window(1, 3, 1).plain_text(), "head\n");
    }

    #[test]
    fn test_bar_lengths() {
        assert_eq!(bar(10.0, 10.0, 4), "████");
        assert_eq!(bar(5.0, 10.0, 4), "██");
        assert_eq!(bar(0.1, 10.0, 4), "█");
        assert_eq!(bar(0.0, 10.0, 4), "");
        assert_eq!(bar(-10.0, 10.0, 4), "████");
    }

    #[test]
    fn test_visualizer_frame_shows_marks() {
        let mut state = swap_state();
        state.advance();
        let frame = VisualizerView::frame(&state, &Theme::dark(), 10);
        let text = frame.plain_text();

        assert!(text.starts_with("sorting visualization\n"));
        assert!(text.contains("  0 ██ 1  swapping\n"));
        assert!(text.contains("  1 ██████ 3\n"));
        assert!(text.contains("  2 ██████████ 5  swapping\n"));
        assert!(text.contains("Swapping positions 0 and 2"));
        assert!(text.contains("Step 1/1  paused"));
    }

    #[test]
    fn test_visualizer_frame_completion() {
        let mut state = swap_state();
        state.advance();
        state.advance();
        let text = VisualizerView::frame(&state, &Theme::dark(), 10).plain_text();
        assert!(text.contains("Array is sorted"));
        assert!(text.contains("complete"));
        assert_eq!(text.matches("sorted").count(), 4);
    }

    #[test]
    fn test_search_frame_highlights_current() {
        let buf = Buffer::from_string("let x = 1;\nlet y = x;");
        let session = SearchSession::run(&buf, "x", SearchOptions::default()).unwrap();
        let theme = Theme::dark();
        let frame = SearchView::frame(&session, &theme, 80);

        assert_eq!(frame.lines.len(), 3);
        assert_eq!(frame.lines[1].text(), "    1:5   let x = 1;");
        assert_eq!(frame.lines[1].spans[2].bg, Some(theme.current_match_bg()));
        assert_eq!(frame.lines[2].spans[2].bg, Some(theme.match_bg()));
        assert_eq!(frame.lines[2].spans[2].text, "x");
    }

    #[test]
    fn test_search_frame_truncates_wide_lines() {
        let buf = Buffer::from_string("界界界界 hit");
        let session = SearchSession::run(&buf, "hit", SearchOptions::default()).unwrap();
        let frame = SearchView::frame(&session, &Theme::dark(), 15);
        // 10 columns of gutter leave 5 for text: two wide chars fit, the third does not
        assert_eq!(frame.lines[1].spans[1].text, "界界");
        assert_eq!(frame.lines[1].spans[2].text, "");
    }

    #[test]
    fn test_renderer_skips_same_revision() {
        let mut renderer = Renderer::new(Theme::dark());
        let mut frame = Frame::default();
        frame.push(Span::plain("hello"));

        let mut out = Vec::new();
        assert!(renderer.render_if_changed(&mut out, &frame, 1).unwrap());
        let written = out.len();
        assert!(String::from_utf8_lossy(&out).contains("hello"));

        assert!(!renderer.render_if_changed(&mut out, &frame, 1).unwrap());
        assert_eq!(out.len(), written);

        renderer.invalidate();
        assert!(renderer.render_if_changed(&mut out, &frame, 1).unwrap());
    }
}
