//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod buffer;
pub mod document;
pub mod formatting;
pub mod session;
pub mod tags;
pub mod ui;

pub use buffer::TextBuffer;
pub use document::Document;
pub use formatting::{FormattingPolicy, FormattingState, Rgb, DEFAULT_FONT_SIZE};
pub use session::{EditSession, PastedImage, Selection};
pub use tags::{StyleRange, Tag, TagFamily, TagTable};
pub use ui::{PendingAction, UiState};

use std::time::Duration;

use crate::config::EditorConfig;
use crate::grid::SpreadsheetGrid;
use crate::syntax::Highlighter;
use crate::theme::{load_theme, Theme};
use crate::view::mode::{ViewMode, ViewModeController};

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// The single open document and its editing session
    pub document: Document,
    /// Cells shown in spreadsheet mode
    pub grid: SpreadsheetGrid,
    /// Mode, language and window chrome
    pub view: ViewModeController,
    pub highlighter: Highlighter,
    /// Status line and pending prompts
    pub ui: UiState,
    /// Theme for colors and styling
    pub theme: Theme,
    /// Persisted editor configuration
    pub config: EditorConfig,
}

impl AppModel {
    /// Build the model from config, loading the configured theme
    pub fn new(config: EditorConfig) -> Self {
        let theme = load_theme(&config.theme).unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load theme '{}': {}, using default",
                config.theme,
                e
            );
            Theme::default()
        });
        Self::with_theme(config, theme)
    }

    /// Build the model with an already resolved theme
    pub fn with_theme(config: EditorConfig, theme: Theme) -> Self {
        let mut document = Document::new();
        document.session.policy = config.formatting_policy();
        document
            .session
            .set_default_size(config.formatting.default_font_size);

        let view = ViewModeController::new(
            config.default_language,
            config.highlight_rules(),
            config.grid.clear_on_mode_switch,
        );

        Self {
            document,
            grid: SpreadsheetGrid::new(config.grid.rows, config.grid.columns),
            view,
            highlighter: Highlighter::new(),
            ui: UiState::default(),
            theme,
            config,
        }
    }

    pub fn session(&self) -> &crate::model::EditSession {
        &self.document.session
    }

    pub fn session_mut(&mut self) -> &mut crate::model::EditSession {
        &mut self.document.session
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    /// Window title for the current mode
    pub fn title(&self) -> String {
        self.view.title(&self.document)
    }

    /// How long a pasted image keeps its highlight
    pub fn image_highlight_delay(&self) -> Duration {
        Duration::from_millis(self.config.image.highlight_ms)
    }

    /// Bookkeeping after any change to the buffer content
    pub fn after_content_change(&mut self) {
        self.document.mark_modified();
        self.view
            .rehighlight(&mut self.document.session, &mut self.highlighter);
    }

    /// Switch view mode and report the status message
    pub fn switch_mode(&mut self, mode: ViewMode) -> bool {
        match self.view.switch_to(
            mode,
            &mut self.document.session,
            &mut self.grid,
            &mut self.highlighter,
        ) {
            Some(status) => {
                self.ui.set_status(status);
                true
            }
            None => false,
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::with_theme(EditorConfig::default(), Theme::default())
    }
}
