//! Error types shared across the crate.

use thiserror::Error;

/// Why a search could not run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The search term was empty; nothing was scanned.
    #[error("Please provide a search term")]
    EmptyQuery,
    /// The term did not compile as a regular expression.
    #[error("Invalid regular expression: {0}")]
    InvalidPattern(String),
}

/// File tree operations that were refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File already exists: {0}")]
    AlreadyExists(String),
    #[error("No such file: {0}")]
    NotFound(String),
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),
}

/// Problems decoding a backend response.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Response carries no visualization")]
    NoVisualization,
}

/// Failures of the command-line modes.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    InvalidPath(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    File(#[from] FileError),
    #[error("Failed to write {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
