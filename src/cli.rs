//! Command-line argument parsing for the headless runner
//!
//! Supports:
//! - Opening a file (language inferred from its extension)
//! - Picking the view mode, language and theme
//! - Filling the spreadsheet grid from a CSV file
//! - Pasting clipboard content or an image file at the end of the document
//! - Exporting (text, code or grid) and dumping the visual tree

use clap::Parser;
use std::path::PathBuf;

use crate::syntax::LanguageId;
use crate::view::mode::ViewMode;

/// A notepad with rich-text, code and spreadsheet modes
#[derive(Parser, Debug, Default)]
#[command(
    name = "scribe",
    version,
    about = "A notepad with rich-text, code and spreadsheet modes"
)]
pub struct CliArgs {
    /// File to open
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// View mode: normal, code or spreadsheet
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Highlighting language for code mode (e.g. "Python", "SQL")
    #[arg(short, long, value_name = "NAME")]
    pub language: Option<String>,

    /// Theme id (dark, light, system or a user theme)
    #[arg(short, long, value_name = "ID")]
    pub theme: Option<String>,

    /// Read config from PATH instead of the user config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Load CSV into the spreadsheet grid (implies spreadsheet mode)
    #[arg(long, value_name = "CSV")]
    pub cells: Option<PathBuf>,

    /// Paste the clipboard at the end of the document
    #[arg(long)]
    pub paste: bool,

    /// Insert an image file (PNG, JPEG, GIF, BMP) at the end of the document
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Save the result to PATH (.csv/.xlsx in spreadsheet mode)
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Print the visual tree as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub file: Option<PathBuf>,
    /// Mode to enter after loading; `None` stays in normal mode
    pub mode: Option<ViewMode>,
    pub language: Option<LanguageId>,
    pub theme: Option<String>,
    pub config_path: Option<PathBuf>,
    pub cells: Option<PathBuf>,
    pub paste: bool,
    pub image: Option<PathBuf>,
    pub export: Option<PathBuf>,
    pub json: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let explicit_mode = match self.mode.as_deref() {
            Some(name) => Some(
                ViewMode::from_name(name).ok_or_else(|| format!("Unknown mode '{}'", name))?,
            ),
            None => None,
        };

        let explicit_language = match self.language.as_deref() {
            Some(name) => Some(
                LanguageId::from_name(name)
                    .ok_or_else(|| format!("Unknown language '{}'", name))?,
            ),
            None => None,
        };

        if self.cells.is_some() && explicit_mode.is_some_and(|m| m != ViewMode::Spreadsheet) {
            return Err("--cells requires spreadsheet mode".to_string());
        }

        let mode = if self.cells.is_some() {
            Some(ViewMode::Spreadsheet)
        } else if explicit_mode.is_none() && explicit_language.is_some() {
            Some(ViewMode::Code)
        } else {
            explicit_mode
        };

        // A recognised extension picks the language when code mode is asked for
        let language = explicit_language.or_else(|| {
            if mode == Some(ViewMode::Code) {
                self.file.as_deref().and_then(LanguageId::from_path)
            } else {
                None
            }
        });

        Ok(StartupConfig {
            file: self.file,
            mode,
            language,
            theme: self.theme,
            config_path: self.config,
            cells: self.cells,
            paste: self.paste,
            image: self.image,
            export: self.export,
            json: self.json,
        })
    }
}
