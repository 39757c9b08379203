//! View modes and the widgets each one shows
//!
//! The controller owns the mode, the code-mode language and the window flags.
//! Mode switches mutate the session, the grid and the syntax tags, and hand
//! back the status text to show.

use serde::{Deserialize, Serialize};

use crate::grid::SpreadsheetGrid;
use crate::model::document::{Document, APP_TITLE};
use crate::model::session::EditSession;
use crate::syntax::{clear_highlighting, HighlightRules, Highlighter, LanguageId};

/// The three ways the editor can present its content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Rich text with the formatting toolbar
    #[default]
    Normal,
    /// Plain text with syntax highlighting and line numbers
    Code,
    /// Cell grid replacing the text view
    Spreadsheet,
}

impl ViewMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "normal" => Some(ViewMode::Normal),
            "code" => Some(ViewMode::Code),
            "spreadsheet" | "grid" => Some(ViewMode::Spreadsheet),
            _ => None,
        }
    }
}

/// Which window affordances are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chrome {
    pub formatting_toolbar: bool,
    pub language_selector: bool,
    pub line_numbers: bool,
    pub word_wrap: bool,
    pub text_view: bool,
    pub grid: bool,
    pub always_on_top: bool,
}

impl Chrome {
    pub fn for_mode(mode: ViewMode, always_on_top: bool) -> Self {
        let (formatting_toolbar, language_selector, line_numbers, word_wrap, text_view, grid) =
            match mode {
                ViewMode::Normal => (true, false, false, true, true, false),
                ViewMode::Code => (false, true, true, false, true, false),
                ViewMode::Spreadsheet => (false, false, false, true, false, true),
            };
        Self {
            formatting_toolbar,
            language_selector,
            line_numbers,
            word_wrap,
            text_view,
            grid,
            always_on_top,
        }
    }
}

impl Default for Chrome {
    fn default() -> Self {
        Self::for_mode(ViewMode::Normal, false)
    }
}

#[derive(Debug, Clone)]
pub struct ViewModeController {
    mode: ViewMode,
    chrome: Chrome,
    pub language: LanguageId,
    pub rules: HighlightRules,
    /// Empty the grid when entering spreadsheet mode or leaving it
    pub clear_grid_on_switch: bool,
}

impl Default for ViewModeController {
    fn default() -> Self {
        Self {
            mode: ViewMode::Normal,
            chrome: Chrome::default(),
            language: LanguageId::default(),
            rules: HighlightRules::default(),
            clear_grid_on_switch: true,
        }
    }
}

impl ViewModeController {
    pub fn new(language: LanguageId, rules: HighlightRules, clear_grid_on_switch: bool) -> Self {
        Self {
            language,
            rules,
            clear_grid_on_switch,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn chrome(&self) -> Chrome {
        self.chrome
    }

    /// Switch modes, returning the status message, or `None` when the switch
    /// was a no-op (entering code mode while already in it).
    pub fn switch_to(
        &mut self,
        target: ViewMode,
        session: &mut EditSession,
        grid: &mut SpreadsheetGrid,
        highlighter: &mut Highlighter,
    ) -> Option<String> {
        let from = self.mode;
        if from == ViewMode::Code && target == ViewMode::Code {
            return None;
        }

        let leaving_grid = from == ViewMode::Spreadsheet && target != ViewMode::Spreadsheet;
        let entering_grid = target == ViewMode::Spreadsheet;
        if self.clear_grid_on_switch && (leaving_grid || entering_grid) {
            grid.clear_all();
        }
        if from == ViewMode::Code {
            clear_highlighting(&mut session.buffer);
        }

        self.mode = target;
        self.chrome = Chrome::for_mode(target, self.chrome.always_on_top);
        tracing::info!("View mode {:?} -> {:?}", from, target);

        let status = match target {
            ViewMode::Normal => {
                session.stamping = true;
                "Switched to Normal Mode".to_string()
            }
            ViewMode::Code => {
                session.stamping = false;
                self.rehighlight(session, highlighter);
                format!("Switched to Code Mode - {}", self.language.display_name())
            }
            ViewMode::Spreadsheet => {
                session.stamping = true;
                "Switched to Spreadsheet Mode".to_string()
            }
        };
        Some(status)
    }

    /// Change the code-mode language; re-highlights when in code mode
    pub fn set_language(
        &mut self,
        language: LanguageId,
        session: &mut EditSession,
        highlighter: &mut Highlighter,
    ) -> String {
        self.language = language;
        self.rehighlight(session, highlighter);
        format!("Language changed to {}", language.display_name())
    }

    /// Re-run the highlighter over the whole buffer (code mode only)
    pub fn rehighlight(&self, session: &mut EditSession, highlighter: &mut Highlighter) {
        if self.mode == ViewMode::Code {
            highlighter.apply(&mut session.buffer, self.language, self.rules);
        }
    }

    pub fn toggle_always_on_top(&mut self) -> String {
        self.chrome.always_on_top = !self.chrome.always_on_top;
        if self.chrome.always_on_top {
            "Window is now always on top".to_string()
        } else {
            "Window is no longer always on top".to_string()
        }
    }

    /// Window title for the current mode
    pub fn title(&self, doc: &Document) -> String {
        match self.mode {
            ViewMode::Normal => doc.title(),
            ViewMode::Code => format!("Code ({}) - {}", self.language.display_name(), APP_TITLE),
            ViewMode::Spreadsheet => format!("Spreadsheet - {}", APP_TITLE),
        }
    }

    /// Extension suggested by Save As
    pub fn default_extension(&self) -> &'static str {
        match self.mode {
            ViewMode::Normal => ".txt",
            ViewMode::Code => self.language.file_extension(),
            ViewMode::Spreadsheet => ".xlsx",
        }
    }
}
