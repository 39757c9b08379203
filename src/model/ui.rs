//! UI state outside the document: the status line and the file action parked
//! behind the unsaved-changes prompt

use std::path::PathBuf;

/// Status text shown before anything happened
pub const READY_STATUS: &str = "Ready";

/// Question asked when a file action would drop unsaved edits
pub const UNSAVED_PROMPT: &str =
    "You have unsaved changes. Do you want to save before continuing?";

/// A file action waiting for the user to answer the unsaved-changes prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    New,
    Open(PathBuf),
    Close,
}

#[derive(Debug, Clone)]
pub struct UiState {
    /// Status bar text
    pub status: String,
    /// Action to resume once the unsaved-changes prompt is answered
    pub pending: Option<PendingAction>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::with_status(READY_STATUS)
    }
}

impl UiState {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            pending: None,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        tracing::debug!("status: {}", self.status);
    }
}
