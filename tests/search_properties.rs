//! Search engine properties: literal coverage, replace-all, error signals.

use codelab::core::app::AppState;
use codelab::core::buffer::Buffer;
use codelab::core::search::{SearchOptions, replace_all, search};
use codelab::error::SearchError;

fn regex() -> SearchOptions {
    SearchOptions {
        use_regex: true,
        ..SearchOptions::default()
    }
}

/// Every non-overlapping case-insensitive occurrence, found the slow way
fn naive_occurrences(text: &str, term: &str) -> Vec<usize> {
    let hay = text.to_ascii_lowercase();
    let needle = term.to_ascii_lowercase();
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(offset) = hay[pos..].find(&needle) {
        let start = pos + offset;
        found.push(start);
        pos = start + needle.len();
    }
    found
}

const CORPUS: &[&str] = &[
    "",
    "foo bar foo baz foo",
    "def sort(arr):\n    for i in range(len(arr)):\n        pass\n",
    "aaaa",
    "Aa aA AA aa",
    "x.y*z x.y*z\n(x.y*z)",
    "line one\n\nline three\n",
    "tabs\tand\ttabs",
];

const TERMS: &[&str] = &["foo", "a", "aa", "arr", "x.y*z", "line", "\t", "(", "zzz", "AA"];

#[test]
fn literal_search_finds_every_occurrence() {
    for text in CORPUS {
        for term in TERMS {
            let matches = search(text, term, SearchOptions::default()).unwrap();
            let starts: Vec<usize> = matches.iter().map(|m| m.start_index).collect();
            // Line splitting never hides a match: no term contains a newline
            assert_eq!(starts, naive_occurrences(text, term), "{term:?} in {text:?}");
            for m in &matches {
                assert!(m.match_text.eq_ignore_ascii_case(term));
                assert_eq!(&text[m.start_index..m.end_index], m.match_text);
                assert_eq!(
                    &m.line_content[m.column_start..m.column_end],
                    m.match_text
                );
            }
        }
    }
}

#[test]
fn replace_all_leaves_no_matches() {
    for text in CORPUS {
        for term in TERMS {
            let mut buffer = Buffer::from_string(text);
            let matches = search(text, term, SearchOptions::default()).unwrap();
            let replaced = replace_all(&mut buffer, &matches, "#");
            assert_eq!(replaced, matches.len());

            let again = search(&buffer.to_string(), term, SearchOptions::default()).unwrap();
            assert!(again.is_empty(), "{term:?} still in {:?}", buffer.to_string());
        }
    }
}

#[test]
fn scenario_three_foos() {
    let matches = search("foo bar foo baz foo", "foo", SearchOptions::default()).unwrap();
    let spans: Vec<(usize, usize)> = matches.iter().map(|m| (m.start_index, m.end_index)).collect();
    assert_eq!(spans, vec![(0, 3), (8, 11), (16, 19)]);
}

#[test]
fn empty_term_is_rejected() {
    for options in [SearchOptions::default(), regex()] {
        assert_eq!(search("anything", "", options), Err(SearchError::EmptyQuery));
    }
}

#[test]
fn invalid_pattern_is_reported() {
    match search("a(b", "a(", regex()) {
        Err(SearchError::InvalidPattern(_)) => {}
        other => panic!("expected invalid pattern, got {other:?}"),
    }
    // The same term is fine as a literal
    assert_eq!(search("a(b", "a(", SearchOptions::default()).unwrap().len(), 1);
}

#[test]
fn app_session_survives_replace_flow() {
    let mut app = AppState::new();
    app.create_file("main.py", "for i in items:\n    print(i)\n").unwrap();

    let whole = SearchOptions {
        whole_word: true,
        ..SearchOptions::default()
    };
    assert_eq!(app.search("i", whole), Ok(2));
    assert_eq!(app.replace_all("item"), 2);
    assert_eq!(
        app.active_buffer().unwrap().to_string(),
        "for item in items:\n    print(item)\n"
    );
    assert_eq!(app.search("i", whole), Ok(0));
    assert_eq!(app.take_message().as_deref(), Some("No matches found"));
}
