//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/scribe/config.yaml`. Every field has
//! a default, so partial files are fine; an unreadable file means defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::image::{MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH};
use crate::model::formatting::{FormattingPolicy, DEFAULT_FONT_SIZE};
use crate::syntax::{HighlightRules, LanguageId};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Theme id: "dark", "light", "system" or a user theme
    pub theme: String,
    /// Language selected when entering code mode
    pub default_language: LanguageId,
    pub formatting: FormattingConfig,
    pub syntax: SyntaxConfig,
    pub grid: GridConfig,
    pub image: ImageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingConfig {
    /// Font size the pending formatting starts with
    pub default_font_size: u16,
    /// Remove older size/color/highlight tags when applying a new one
    pub replace_conflicting_tags: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Use each language's own comment and function syntax instead of `#` / `def`
    pub per_language_rules: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    /// Empty all cells when entering or leaving spreadsheet mode
    pub clear_on_mode_switch: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub max_width: u32,
    pub max_height: u32,
    /// How long a freshly pasted image stays highlighted
    pub highlight_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            default_language: LanguageId::Python,
            formatting: FormattingConfig::default(),
            syntax: SyntaxConfig::default(),
            grid: GridConfig::default(),
            image: ImageConfig::default(),
        }
    }
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            default_font_size: DEFAULT_FONT_SIZE,
            replace_conflicting_tags: true,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLS,
            clear_on_mode_switch: true,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_width: MAX_IMAGE_WIDTH,
            max_height: MAX_IMAGE_HEIGHT,
            highlight_ms: 3000,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn formatting_policy(&self) -> FormattingPolicy {
        if self.formatting.replace_conflicting_tags {
            FormattingPolicy::Replace
        } else {
            FormattingPolicy::Accumulate
        }
    }

    pub fn highlight_rules(&self) -> HighlightRules {
        if self.syntax.per_language_rules {
            HighlightRules::PerLanguage
        } else {
            HighlightRules::Compatible
        }
    }

    pub fn image_max(&self) -> (u32, u32) {
        (self.image.max_width, self.image.max_height)
    }
}
