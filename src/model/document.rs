//! Document model - the editing session plus its file state

use std::path::{Path, PathBuf};

use super::buffer::OBJECT_REPLACEMENT;
use super::session::EditSession;
use crate::error::EditorError;

/// Application name shown in every window title
pub const APP_TITLE: &str = "Modern Notepad";

#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Buffer, caret, selection and pending formatting
    pub session: EditSession,
    /// Path to the file on disk (None for new/unsaved files)
    pub file_path: Option<PathBuf>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
    /// Incremented on each edit
    pub revision: u64,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            session: EditSession::with_text(text),
            ..Self::default()
        }
    }

    /// Load a document from a file path (UTF-8)
    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let mut doc = Self::new();
        doc.open(path)?;
        Ok(doc)
    }

    /// Replace the buffer with a file's contents. On error nothing changes.
    pub fn open(&mut self, path: &Path) -> Result<(), EditorError> {
        let content = std::fs::read_to_string(path).map_err(|source| EditorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.session.load_text(&content);
        self.file_path = Some(path.to_path_buf());
        self.is_modified = false;
        self.revision += 1;
        tracing::info!("Opened {} ({} chars)", path.display(), content.len());
        Ok(())
    }

    /// Clear the buffer and forget the file path
    pub fn reset(&mut self) {
        self.session.load_text("");
        self.file_path = None;
        self.is_modified = false;
        self.revision += 1;
    }

    /// Write the buffer to `path` and adopt it as the document's path.
    /// On error the in-memory state is unchanged.
    pub fn save_to(&mut self, path: &Path) -> Result<(), EditorError> {
        let content = self.plain_text();
        std::fs::write(path, &content).map_err(|source| EditorError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.file_path = Some(path.to_path_buf());
        self.is_modified = false;
        tracing::info!("Saved {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    /// Buffer text as written to disk; image slots are not text and are dropped
    pub fn plain_text(&self) -> String {
        self.session
            .buffer
            .text()
            .chars()
            .filter(|c| *c != OBJECT_REPLACEMENT)
            .collect()
    }

    pub fn mark_modified(&mut self) {
        self.is_modified = true;
        self.revision += 1;
    }

    /// File name of the document, if it has a path
    pub fn display_name(&self) -> Option<String> {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().to_string())
    }

    /// Normal-mode window title: `[*]<file> - Modern Notepad`
    pub fn title(&self) -> String {
        let base = match self.display_name() {
            Some(name) => format!("{} - {}", name, APP_TITLE),
            None => APP_TITLE.to_string(),
        };
        if self.is_modified {
            format!("*{}", base)
        } else {
            base
        }
    }
}
