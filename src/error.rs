use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning a word-list file into a `WordStore`.
///
/// Nothing is committed when one of these is returned; the caller keeps
/// whatever store it had before.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceLoadError {
    #[error("word list not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read spreadsheet {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("unsupported word list format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("spreadsheet has no sheets: {0}")]
    EmptySheet(PathBuf),
    #[error("no columns found in the word list")]
    NoColumns,
    #[error("word list needs at least {required} columns, found {found}")]
    TooFewColumns { required: usize, found: usize },
    #[error("no usable words found in the word list")]
    NoWords,
}

/// Failures while drawing words for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("no words available")]
    EmptySelection,
}

/// A dictionary lookup that produced no definition.
///
/// These never reach the user: the dictionary substitutes a placeholder.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LookupError {
    #[error("dictionary lookup timed out")]
    Timeout,
    #[error("dictionary request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected dictionary response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid dictionary url: {0}")]
    InvalidUrl(String),
    #[error("dictionary returned no definition")]
    NoDefinition,
}
