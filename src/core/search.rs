//! Text search and replace over an in-memory buffer.
//!
//! Matches are recomputed from scratch on every `search` call; there is no
//! incremental index. Offsets in a `SearchMatch` are byte offsets, both into
//! the whole text (`start_index`/`end_index`) and into the matched line
//! (`column_start`/`column_end`).

use regex::{Regex, RegexBuilder};

use crate::core::buffer::Buffer;
use crate::error::SearchError;

/// Flags controlling how a term is matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub use_regex: bool,
}

/// One hit in the searched text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// 1-based line number
    pub line_number: usize,
    /// The full line the match sits on (without its newline)
    pub line_content: String,
    /// Absolute start offset in the searched text
    pub start_index: usize,
    /// Absolute end offset (exclusive)
    pub end_index: usize,
    pub match_text: String,
    /// Start offset within the line
    pub column_start: usize,
    /// End offset within the line (exclusive)
    pub column_end: usize,
}

impl SearchMatch {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }
}

/// Build the matcher for `term`.
///
/// Literal terms are escaped; `whole_word` only applies to literal terms.
fn compile(term: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.use_regex {
        term.to_string()
    } else if options.whole_word {
        format!(r"\b{}\b", regex::escape(term))
    } else {
        regex::escape(term)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(|e| SearchError::InvalidPattern(e.to_string()))
}

/// Find all non-overlapping matches of `term` in `text`.
///
/// Returns matches in line order, then left to right within a line.
pub fn search(
    text: &str,
    term: &str,
    options: SearchOptions,
) -> Result<Vec<SearchMatch>, SearchError> {
    if term.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    let regex = compile(term, options)?;

    let mut matches = Vec::new();
    let mut line_offset = 0;

    for (line_idx, line) in text.split('\n').enumerate() {
        let mut pos = 0;
        while pos <= line.len() {
            let Some(m) = regex.find_at(line, pos) else {
                break;
            };

            matches.push(SearchMatch {
                line_number: line_idx + 1,
                line_content: line.to_string(),
                start_index: line_offset + m.start(),
                end_index: line_offset + m.end(),
                match_text: m.as_str().to_string(),
                column_start: m.start(),
                column_end: m.end(),
            });

            pos = if m.end() > m.start() {
                m.end()
            } else {
                // Zero-width hit: step over one character or we would match here forever
                m.end() + line[m.end()..].chars().next().map_or(1, char::len_utf8)
            };
        }

        // +1 for the '\n' separator consumed by split
        line_offset += line.len() + 1;
    }

    tracing::debug!(term, count = matches.len(), "search finished");
    Ok(matches)
}

/// Replace the match at `index` with `replacement`.
///
/// Offsets of every later match are stale afterwards; callers must search
/// again. Returns false if `index` is out of range.
pub fn replace_one(
    buffer: &mut Buffer,
    matches: &[SearchMatch],
    index: usize,
    replacement: &str,
) -> bool {
    let Some(m) = matches.get(index) else {
        return false;
    };
    buffer.splice(m.start_index, m.end_index, replacement);
    true
}

/// Replace every match with `replacement`, returning how many were replaced.
pub fn replace_all(buffer: &mut Buffer, matches: &[SearchMatch], replacement: &str) -> usize {
    // Highest offset first so the offsets of the remaining matches stay valid
    for m in descending(matches) {
        buffer.splice(m.start_index, m.end_index, replacement);
    }
    matches.len()
}

/// `replace_all` over a plain string.
pub fn replace_all_in(text: &str, matches: &[SearchMatch], replacement: &str) -> String {
    let mut out = text.to_string();
    for m in descending(matches) {
        out.replace_range(m.start_index..m.end_index, replacement);
    }
    out
}

fn descending(matches: &[SearchMatch]) -> Vec<&SearchMatch> {
    let mut ordered: Vec<&SearchMatch> = matches.iter().collect();
    ordered.sort_by(|a, b| b.start_index.cmp(&a.start_index));
    ordered
}

/// A search run kept alive for navigation and replacement.
///
/// A session belongs to one buffer version; any edit to the buffer
/// invalidates it.
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub term: String,
    pub options: SearchOptions,
    pub matches: Vec<SearchMatch>,
    /// Index of the highlighted match
    pub current: usize,
    /// Buffer version the matches were computed against
    pub buffer_version: u64,
}

impl SearchSession {
    /// Run a search against `buffer` and keep the results.
    pub fn run(buffer: &Buffer, term: &str, options: SearchOptions) -> Result<Self, SearchError> {
        let matches = search(&buffer.to_string(), term, options)?;
        Ok(Self {
            term: term.to_string(),
            options,
            matches,
            current: 0,
            buffer_version: buffer.version,
        })
    }

    /// True if `buffer` changed since the matches were computed
    pub fn is_stale(&self, buffer: &Buffer) -> bool {
        self.buffer_version != buffer.version
    }

    pub fn current_match(&self) -> Option<&SearchMatch> {
        self.matches.get(self.current)
    }

    /// Move to the next match, wrapping at the end
    pub fn next(&mut self) -> Option<&SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.matches.len();
        self.current_match()
    }

    /// Move to the previous match, wrapping at the start
    pub fn previous(&mut self) -> Option<&SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = self
            .current
            .checked_sub(1)
            .unwrap_or(self.matches.len() - 1);
        self.current_match()
    }

    /// Human readable summary, e.g. "2 of 5 matches"
    pub fn status_line(&self) -> String {
        match self.matches.len() {
            0 => "No matches found".to_string(),
            1 => "1 of 1 match".to_string(),
            n => format!("{} of {} matches", self.current + 1, n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(case_sensitive: bool, whole_word: bool, use_regex: bool) -> SearchOptions {
        SearchOptions {
            case_sensitive,
            whole_word,
            use_regex,
        }
    }

    fn spans(matches: &[SearchMatch]) -> Vec<(usize, usize)> {
        matches.iter().map(|m| (m.start_index, m.end_index)).collect()
    }

    #[test]
    fn test_literal_offsets() {
        let matches = search("foo bar foo baz foo", "foo", SearchOptions::default()).unwrap();
        assert_eq!(spans(&matches), vec![(0, 3), (8, 11), (16, 19)]);
        assert!(matches.iter().all(|m| m.line_number == 1));
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let matches = search("Foo FOO foo", "foo", SearchOptions::default()).unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[1].match_text, "FOO");

        let strict = search("Foo FOO foo", "foo", opts(true, false, false)).unwrap();
        assert_eq!(spans(&strict), vec![(8, 11)]);
    }

    #[test]
    fn test_multiline_offsets() {
        let text = "let a = 1;\nlet b = a;\n\nlet c = b;";
        let matches = search(text, "let", SearchOptions::default()).unwrap();
        assert_eq!(spans(&matches), vec![(0, 3), (11, 14), (23, 26)]);
        assert_eq!(matches[2].line_number, 4);
        assert_eq!(matches[2].line_content, "let c = b;");
        assert_eq!((matches[2].column_start, matches[2].column_end), (0, 3));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let matches = search("a.b a+b a.b", "a.b", SearchOptions::default()).unwrap();
        assert_eq!(spans(&matches), vec![(0, 3), (8, 11)]);

        let parens = search("call(x) call(y)", "call(", SearchOptions::default()).unwrap();
        assert_eq!(parens.len(), 2);
    }

    #[test]
    fn test_whole_word() {
        let text = "cat concat cat_1 cat.";
        let matches = search(text, "cat", opts(false, true, false)).unwrap();
        assert_eq!(spans(&matches), vec![(0, 3), (17, 20)]);
    }

    #[test]
    fn test_regex_mode() {
        let matches = search("x1 y22 z333", r"\d+", opts(false, false, true)).unwrap();
        let texts: Vec<&str> = matches.iter().map(|m| m.match_text.as_str()).collect();
        assert_eq!(texts, vec!["1", "22", "333"]);
    }

    #[test]
    fn test_zero_width_matches_terminate() {
        let matches = search("bab", "a*", opts(false, false, true)).unwrap();
        assert_eq!(spans(&matches), vec![(0, 0), (1, 2), (2, 2), (3, 3)]);

        let unicode = search("éé", "x*", opts(false, false, true)).unwrap();
        assert_eq!(spans(&unicode), vec![(0, 0), (2, 2), (4, 4)]);

        let boundaries = search("ab\ncd", "^", opts(false, false, true)).unwrap();
        assert_eq!(spans(&boundaries), vec![(0, 0), (3, 3)]);
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(
            search("anything", "", SearchOptions::default()),
            Err(SearchError::EmptyQuery)
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let result = search("a(b", "a(", opts(false, false, true));
        assert!(matches!(result, Err(SearchError::InvalidPattern(_))));
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let matches = search("hello", "zzz", SearchOptions::default()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_replace_one_leaves_others() {
        let mut buf = Buffer::from_string("foo bar foo");
        let matches = search(&buf.to_string(), "foo", SearchOptions::default()).unwrap();
        assert!(replace_one(&mut buf, &matches, 1, "qux"));
        assert_eq!(buf.to_string(), "foo bar qux");
        assert!(!replace_one(&mut buf, &matches, 5, "qux"));
    }

    #[test]
    fn test_replace_all_descending() {
        let mut buf = Buffer::from_string("foo bar foo\nfoo!");
        let matches = search(&buf.to_string(), "foo", SearchOptions::default()).unwrap();
        let count = replace_all(&mut buf, &matches, "longer_name");
        assert_eq!(count, 3);
        assert_eq!(buf.to_string(), "longer_name bar longer_name\nlonger_name!");
    }

    #[test]
    fn test_replace_all_in_str() {
        let text = "aXbXc";
        let matches = search(text, "x", SearchOptions::default()).unwrap();
        assert_eq!(replace_all_in(text, &matches, ""), "abc");
    }

    #[test]
    fn test_session_navigation() {
        let buf = Buffer::from_string("a a a");
        let mut session = SearchSession::run(&buf, "a", SearchOptions::default()).unwrap();
        assert_eq!(session.status_line(), "1 of 3 matches");
        assert_eq!(session.previous().map(|m| m.start_index), Some(4));
        assert_eq!(session.next().map(|m| m.start_index), Some(0));
        assert_eq!(session.next().map(|m| m.start_index), Some(2));
        assert_eq!(session.status_line(), "2 of 3 matches");
    }

    #[test]
    fn test_session_staleness() {
        let mut buf = Buffer::from_string("abc");
        let session = SearchSession::run(&buf, "b", SearchOptions::default()).unwrap();
        assert!(!session.is_stale(&buf));
        buf.insert(0, "z");
        assert!(session.is_stale(&buf));
    }
}
