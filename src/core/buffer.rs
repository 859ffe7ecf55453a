//! Buffer: text content of one open file
//! No cursor, selection, or search state (those belong to the shell and to `SearchSession`)
//!
//! Uses a ropey Rope so splices stay O(log n) regardless of file size.
//! All positions in this API are byte offsets.

use ropey::Rope;

/// Buffer: text plus change tracking
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Text content stored in a Rope (O(log n) operations)
    rope: Rope,
    /// Dirty flag (true if the buffer changed since it was loaded)
    pub modified: bool,
    /// Version counter, bumped on every mutation
    pub version: u64,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            modified: false,
            version: 0,
        }
    }

    /// Create a buffer from a string
    pub fn from_string(content: impl AsRef<str>) -> Self {
        Self {
            rope: Rope::from_str(content.as_ref()),
            modified: false,
            version: 0,
        }
    }

    // ==================== Content Access ====================

    /// Get total length in bytes
    pub fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Get entire content as string
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Get a range of text as string
    pub fn get_range_as_string(&self, start: usize, end: usize) -> String {
        let len = self.rope.len_bytes();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return String::new();
        }
        self.rope.byte_slice(start..end).to_string()
    }

    // ==================== Line Operations (O(log n) via Rope) ====================

    /// Get number of lines in buffer
    /// An empty buffer has one (empty) line
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get byte offset for start of a line
    pub fn line_to_byte(&self, line_idx: usize) -> Option<usize> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.line_to_byte(line_idx))
    }

    /// Get content of a specific line (without newline)
    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').to_string())
    }

    // ==================== Editing Operations ====================

    /// Insert text at byte position
    pub fn insert(&mut self, pos: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let pos = pos.min(self.rope.len_bytes());
        let char_idx = self.rope.byte_to_char(pos);
        self.rope.insert(char_idx, text);
        self.mark_modified();
    }

    /// Delete `len` bytes starting at byte position
    pub fn delete(&mut self, pos: usize, len: usize) {
        if len == 0 || pos >= self.rope.len_bytes() {
            return;
        }
        let actual_len = len.min(self.rope.len_bytes() - pos);
        let start_char = self.rope.byte_to_char(pos);
        let end_char = self.rope.byte_to_char(pos + actual_len);
        self.rope.remove(start_char..end_char);
        self.mark_modified();
    }

    /// Replace the byte range `[start, end)` with `text` as one edit
    pub fn splice(&mut self, start: usize, end: usize, text: &str) {
        let len = self.rope.len_bytes();
        let start = start.min(len);
        let end = end.clamp(start, len);
        if start == end && text.is_empty() {
            return;
        }
        let start_char = self.rope.byte_to_char(start);
        let end_char = self.rope.byte_to_char(end);
        self.rope.remove(start_char..end_char);
        self.rope.insert(start_char, text);
        self.mark_modified();
    }

    fn mark_modified(&mut self) {
        self.modified = true;
        self.version = self.version.wrapping_add(1);
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}
