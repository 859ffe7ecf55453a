//! In-memory file tree: filename -> content, language tag and image flag.

use std::collections::BTreeMap;

use crate::core::buffer::Buffer;
use crate::error::FileError;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico"];

/// Language tag for a filename, from its extension
pub fn language_for(filename: &str) -> &'static str {
    let ext = extension(filename);
    match ext.as_str() {
        "py" => "python",
        "js" | "mjs" => "javascript",
        "ts" => "typescript",
        "html" | "htm" => "html",
        "css" => "css",
        "md" | "markdown" => "markdown",
        "json" => "json",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "rs" => "rust",
        "sh" => "shell",
        _ if is_image_name(filename) => "image",
        _ => "plaintext",
    }
}

/// True for file names whose extension marks an image upload
pub fn is_image_name(filename: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension(filename).as_str())
}

fn extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

fn validate_name(name: &str) -> Result<(), FileError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed != name || name.contains('/') || name.contains('\\') {
        return Err(FileError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// One file in the tree
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub buffer: Buffer,
    pub language: String,
    /// Image uploads hold a data URL instead of source text
    pub is_image: bool,
}

impl FileRecord {
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            buffer: Buffer::from_string(content),
            language: language_for(name).to_string(),
            is_image: is_image_name(name),
        }
    }
}

/// All files of the workspace, iterated in name order
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    files: BTreeMap<String, FileRecord>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&FileRecord> {
        self.files.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FileRecord> {
        self.files.get_mut(name)
    }

    /// Create a new source file
    pub fn create(&mut self, name: &str, content: &str) -> Result<&mut FileRecord, FileError> {
        validate_name(name)?;
        if self.files.contains_key(name) {
            return Err(FileError::AlreadyExists(name.to_string()));
        }
        tracing::debug!(name, "file created");
        Ok(self
            .files
            .entry(name.to_string())
            .or_insert_with(|| FileRecord::new(name, content)))
    }

    /// Add an uploaded file, replacing any file with the same name
    pub fn upload(&mut self, name: &str, content: &str) -> Result<&mut FileRecord, FileError> {
        validate_name(name)?;
        let record = FileRecord::new(name, content);
        tracing::debug!(name, is_image = record.is_image, "file uploaded");
        self.files.insert(name.to_string(), record);
        self.files
            .get_mut(name)
            .ok_or_else(|| FileError::NotFound(name.to_string()))
    }

    pub fn delete(&mut self, name: &str) -> Result<FileRecord, FileError> {
        let record = self
            .files
            .remove(name)
            .ok_or_else(|| FileError::NotFound(name.to_string()))?;
        tracing::debug!(name, "file deleted");
        Ok(record)
    }

    /// Move `old` to `new`: insert under the new name, then drop the old one.
    ///
    /// The language tag follows the new extension. There is no rollback.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), FileError> {
        validate_name(new)?;
        if old == new {
            return Ok(());
        }
        if self.files.contains_key(new) {
            return Err(FileError::AlreadyExists(new.to_string()));
        }
        let mut record = self
            .files
            .get(old)
            .cloned()
            .ok_or_else(|| FileError::NotFound(old.to_string()))?;
        record.language = language_for(new).to_string();
        record.is_image = is_image_name(new);

        self.files.insert(new.to_string(), record);
        self.files.remove(old);
        tracing::debug!(old, new, "file renamed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_detection() {
        assert_eq!(language_for("main.py"), "python");
        assert_eq!(language_for("index.HTML"), "html");
        assert_eq!(language_for("README.md"), "markdown");
        assert_eq!(language_for("logo.png"), "image");
        assert_eq!(language_for("Makefile"), "plaintext");
    }

    #[test]
    fn test_create_and_duplicate() {
        let mut store = FileStore::new();
        store.create("main.py", "print('hi')").unwrap();
        assert_eq!(
            store.create("main.py", "").unwrap_err(),
            FileError::AlreadyExists("main.py".to_string())
        );
        assert_eq!(store.get("main.py").unwrap().language, "python");
    }

    #[test]
    fn test_invalid_names() {
        let mut store = FileStore::new();
        assert!(store.create("", "").is_err());
        assert!(store.create("dir/file.py", "").is_err());
        assert!(store.create(" spaced.py", "").is_err());
    }

    #[test]
    fn test_upload_image() {
        let mut store = FileStore::new();
        let record = store.upload("cat.JPG", "data:image/jpeg;base64,AAAA").unwrap();
        assert!(record.is_image);
    }

    #[test]
    fn test_rename_moves_content() {
        let mut store = FileStore::new();
        store.create("notes.txt", "# Title").unwrap();
        store.rename("notes.txt", "notes.md").unwrap();
        assert!(!store.contains("notes.txt"));
        let record = store.get("notes.md").unwrap();
        assert_eq!(record.buffer.to_string(), "# Title");
        assert_eq!(record.language, "markdown");
    }

    #[test]
    fn test_rename_conflicts() {
        let mut store = FileStore::new();
        store.create("a.py", "a").unwrap();
        store.create("b.py", "b").unwrap();
        assert!(store.rename("a.py", "b.py").is_err());
        assert!(store.rename("missing.py", "c.py").is_err());
        assert_eq!(store.get("a.py").unwrap().buffer.to_string(), "a");
    }

    #[test]
    fn test_names_sorted() {
        let mut store = FileStore::new();
        store.create("z.py", "").unwrap();
        store.create("a.py", "").unwrap();
        let names: Vec<&str> = store.names().collect();
        assert_eq!(names, vec!["a.py", "z.py"]);
        store.delete("a.py").unwrap();
        assert_eq!(store.len(), 1);
    }
}
