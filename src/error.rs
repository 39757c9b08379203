//! Error types for fallible model operations
//!
//! Errors are grouped the way the editor surfaces them: I/O failures become
//! error dialogs, state errors (bad ranges, empty selections) degrade to
//! status messages, export errors may fall back to CSV.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid range {start}..{end} for buffer of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("no text selected")]
    EmptySelection,

    #[error("could not open file: {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not save file: {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid cell id '{0}'")]
    InvalidCell(String),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("could not save spreadsheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not save spreadsheet: {0}")]
    Xlsx(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("invalid image data: {0}")]
    Image(String),
}

impl EditorError {
    /// Whether this error should be shown as a modal dialog rather than a status message
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EditorError::Read { .. }
                | EditorError::Write { .. }
                | EditorError::Csv(_)
                | EditorError::Xlsx(_)
        )
    }
}
