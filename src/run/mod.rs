//! Command-line modes: `viz` (interactive or headless replay), `search`
//! and the interactive `find`.

mod search;
mod visualize;

use std::path::{Path, PathBuf};

use crate::core::app::AppState;
use crate::error::RunError;

pub use search::{run_search_interactive, run_search_mode, search_screen};
pub use visualize::{load_payload, run_headless, run_interactive};

/// Validate and canonicalize an input path, refusing device files and pipes.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, RunError> {
    let canonical = path
        .canonicalize()
        .map_err(|e| RunError::InvalidPath(format!("{}: {}", path.display(), e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if let Ok(metadata) = std::fs::metadata(&canonical) {
            let ft = metadata.file_type();
            if ft.is_char_device() {
                return Err(RunError::InvalidPath(
                    "Cannot open character device files (e.g., /dev/zero)".to_string(),
                ));
            }
            if ft.is_block_device() {
                return Err(RunError::InvalidPath(
                    "Cannot open block device files".to_string(),
                ));
            }
            if ft.is_fifo() {
                return Err(RunError::InvalidPath(
                    "Cannot open FIFO/named pipe files".to_string(),
                ));
            }
            if ft.is_socket() {
                return Err(RunError::InvalidPath("Cannot open socket files".to_string()));
            }
        }
    }

    if canonical.is_dir() {
        return Err(RunError::InvalidPath(format!(
            "{} is a directory",
            canonical.display()
        )));
    }

    Ok(canonical)
}

/// Bottom line of the interactive screens: the open prompt, else the message
pub fn message_line(app: &AppState) -> Option<String> {
    match app.prompt.as_ref() {
        Some(prompt) => Some(prompt.line()),
        None => app.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatcher::InputAction;
    use crate::core::prompt::PromptState;

    #[test]
    fn test_prompt_shadows_message() {
        let mut app = AppState::new();
        assert_eq!(message_line(&app), None);
        app.set_message("3 of 7 matches");
        assert_eq!(message_line(&app).as_deref(), Some("3 of 7 matches"));

        let mut prompt = PromptState::new("Search: ", InputAction::Search);
        prompt.insert_char('x');
        app.prompt = Some(prompt);
        assert_eq!(message_line(&app).as_deref(), Some("Search: x"));
    }

    #[test]
    fn test_missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_file_path(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(RunError::InvalidPath(_))));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_file_path(dir.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_device_rejected() {
        let result = validate_file_path(Path::new("/dev/null"));
        assert!(matches!(result, Err(RunError::InvalidPath(_))));
    }

    #[test]
    fn test_regular_file_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "x").unwrap();
        let canonical = validate_file_path(&path).unwrap();
        assert!(canonical.is_absolute());
    }
}
