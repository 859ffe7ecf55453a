//! Line hunks between a text and its replaced version, for previewing a
//! replace-all before it is written.

use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// 0-based line in the original text where the hunk starts
    pub start_line: usize,
    pub old_lines: Vec<String>,
    pub new_lines: Vec<String>,
}

pub struct DiffView {
    pub original: String,
    pub modified: String,
}

impl DiffView {
    pub fn new(original: String, modified: String) -> Self {
        Self { original, modified }
    }

    pub fn compute_hunks(&self) -> Vec<Hunk> {
        let diff = TextDiff::from_lines(&self.original, &self.modified);
        let mut hunks = Vec::new();

        for hunk in diff.unified_diff().context_radius(0).iter_hunks() {
            let mut old_lines = Vec::new();
            let mut new_lines = Vec::new();
            let mut start_line = None;

            for change in hunk.iter_changes() {
                match change.tag() {
                    ChangeTag::Delete => {
                        start_line = start_line.or(change.old_index());
                        old_lines.push(change.value().trim_end_matches('\n').to_string());
                    }
                    ChangeTag::Insert => {
                        new_lines.push(change.value().trim_end_matches('\n').to_string());
                    }
                    ChangeTag::Equal => {}
                }
            }

            if !old_lines.is_empty() || !new_lines.is_empty() {
                hunks.push(Hunk {
                    start_line: start_line.unwrap_or(0),
                    old_lines,
                    new_lines,
                });
            }
        }

        hunks
    }

    /// Render hunks as `-`/`+` lines with 1-based line headers
    pub fn render(&self) -> String {
        let mut out = String::new();
        for hunk in self.compute_hunks() {
            out.push_str(&format!("@@ line {} @@\n", hunk.start_line + 1));
            for line in &hunk.old_lines {
                out.push_str(&format!("-{}\n", line));
            }
            for line in &hunk.new_lines {
                out.push_str(&format!("+{}\n", line));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_hunk() {
        let view = DiffView::new(
            "one\ntwo\nthree\n".to_string(),
            "one\n2\nthree\n".to_string(),
        );
        let hunks = view.compute_hunks();
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].start_line, 1);
        assert_eq!(hunks[0].old_lines, vec!["two"]);
        assert_eq!(hunks[0].new_lines, vec!["2"]);
    }

    #[test]
    fn test_no_changes() {
        let view = DiffView::new("same\n".to_string(), "same\n".to_string());
        assert!(view.compute_hunks().is_empty());
        assert_eq!(view.render(), "");
    }

    #[test]
    fn test_render() {
        let view = DiffView::new("a\nb\n".to_string(), "a\nc\n".to_string());
        assert_eq!(view.render(), "@@ line 2 @@\n-b\n+c\n");
    }
}
