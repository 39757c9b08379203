//! Theme system for the editor
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from config directories.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/scribe/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary
//!
//! The `system` id resolves to `dark` or `light` (see [`resolve_theme_id`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::formatting::Rgb;
use crate::syntax::SyntaxKind;

// Embed theme YAML files at compile time
pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// Environment variable consulted when resolving the `system` theme
pub const SYSTEM_THEME_ENV: &str = "SCRIBE_SYSTEM_THEME";

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "dark", "light")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "dark",
        yaml: DARK_YAML,
    },
    BuiltinTheme {
        id: "light",
        yaml: LIGHT_YAML,
    },
];

/// Ids offered in the theme menu
pub const THEME_MENU: [&str; 3] = ["dark", "light", "system"];

/// Map `system` to a concrete theme id; other ids pass through.
///
/// `SCRIBE_SYSTEM_THEME=light|dark` overrides the platform hint. Without a
/// hint the dark theme is used.
pub fn resolve_theme_id(id: &str) -> String {
    if id != "system" {
        return id.to_string();
    }
    let hint = std::env::var(SYSTEM_THEME_ENV)
        .ok()
        .or_else(platform_theme_hint);
    match hint.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("light") => "light".to_string(),
        _ => "dark".to_string(),
    }
}

/// Desktop appearance hint where one is cheaply available
fn platform_theme_hint() -> Option<String> {
    // GTK desktops expose the preference through the theme name
    std::env::var("GTK_THEME").ok().map(|theme| {
        if theme.to_ascii_lowercase().contains("dark") {
            "dark".to_string()
        } else {
            "light".to_string()
        }
    })
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    let resolved = resolve_theme_id(id);

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", resolved));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path).map(|t| t.with_id(id));
        }
    }

    tracing::info!("Loading builtin theme: {}", resolved);
    Theme::from_builtin(&resolved).map(|t| t.with_id(id))
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
    pub syntax: SyntaxThemeData,
}

/// UI theme colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub window: WindowThemeData,
    pub editor: EditorThemeData,
    pub gutter: GutterThemeData,
    pub status_bar: StatusBarThemeData,
    #[serde(default)]
    pub image_highlight: Option<ImageHighlightThemeData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowThemeData {
    pub background: String,
    pub header_background: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
    pub foreground: String,
    #[serde(default)]
    pub selection_background: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GutterThemeData {
    pub background: String,
    pub foreground: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusBarThemeData {
    pub background: String,
    pub foreground: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageHighlightThemeData {
    pub background: String,
    pub border: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyntaxThemeData {
    pub keyword: String,
    pub string: String,
    pub comment: String,
    pub number: String,
    pub function: String,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    /// Id this theme was requested under ("system" stays "system")
    pub id: String,
    pub name: String,
    pub window: WindowTheme,
    pub editor: EditorTheme,
    pub gutter: GutterTheme,
    pub status_bar: StatusBarTheme,
    pub image_highlight: ImageHighlightTheme,
    pub syntax: SyntaxTheme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowTheme {
    pub background: Rgb,
    pub header_background: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorTheme {
    pub background: Rgb,
    pub foreground: Rgb,
    pub selection_background: Rgb,
}

/// Line-number gutter shown in code mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GutterTheme {
    pub background: Rgb,
    pub foreground: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBarTheme {
    pub background: Rgb,
    pub foreground: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageHighlightTheme {
    pub background: Rgb,
    pub border: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxTheme {
    pub keyword: Rgb,
    pub string: Rgb,
    pub comment: Rgb,
    pub number: Rgb,
    pub function: Rgb,
}

impl SyntaxTheme {
    pub fn color(&self, kind: SyntaxKind) -> Rgb {
        match kind {
            SyntaxKind::Keyword => self.keyword,
            SyntaxKind::String => self.string,
            SyntaxKind::Comment => self.comment,
            SyntaxKind::Number => self.number,
            SyntaxKind::Function => self.function,
        }
    }
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml).map(|t| t.with_id(id))
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let default_selection_bg = Rgb::new(0x00, 0x78, 0xD4);
        let image_highlight = match &data.ui.image_highlight {
            Some(h) => ImageHighlightTheme {
                background: Rgb::from_hex(&h.background)?,
                border: Rgb::from_hex(&h.border)?,
            },
            None => ImageHighlightTheme {
                background: default_selection_bg,
                border: Rgb::new(0xFF, 0xFF, 0xFF),
            },
        };

        Ok(Theme {
            id: data.name.to_lowercase(),
            name: data.name,
            window: WindowTheme {
                background: Rgb::from_hex(&data.ui.window.background)?,
                header_background: Rgb::from_hex(&data.ui.window.header_background)?,
            },
            editor: EditorTheme {
                background: Rgb::from_hex(&data.ui.editor.background)?,
                foreground: Rgb::from_hex(&data.ui.editor.foreground)?,
                selection_background: data
                    .ui
                    .editor
                    .selection_background
                    .as_ref()
                    .map(|s| Rgb::from_hex(s))
                    .transpose()?
                    .unwrap_or(default_selection_bg),
            },
            gutter: GutterTheme {
                background: Rgb::from_hex(&data.ui.gutter.background)?,
                foreground: Rgb::from_hex(&data.ui.gutter.foreground)?,
            },
            status_bar: StatusBarTheme {
                background: Rgb::from_hex(&data.ui.status_bar.background)?,
                foreground: Rgb::from_hex(&data.ui.status_bar.foreground)?,
            },
            image_highlight,
            syntax: SyntaxTheme {
                keyword: Rgb::from_hex(&data.syntax.keyword)?,
                string: Rgb::from_hex(&data.syntax.string)?,
                comment: Rgb::from_hex(&data.syntax.comment)?,
                number: Rgb::from_hex(&data.syntax.number)?,
                function: Rgb::from_hex(&data.syntax.function)?,
            },
        })
    }

    fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Display name for status messages ("Dark", "System")
    pub fn title(&self) -> String {
        let mut chars = self.id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Dark theme (YAML-backed with Rust fallback)
    pub fn dark() -> Self {
        match Theme::from_builtin("dark") {
            Ok(theme) => theme,
            Err(_) => Theme {
                id: "dark".to_string(),
                name: "Dark".to_string(),
                window: WindowTheme {
                    background: Rgb::new(0x2B, 0x2B, 0x2B),
                    header_background: Rgb::new(0x1E, 0x1E, 0x1E),
                },
                editor: EditorTheme {
                    background: Rgb::new(0x1E, 0x1E, 0x1E),
                    foreground: Rgb::new(0xFF, 0xFF, 0xFF),
                    selection_background: Rgb::new(0x00, 0x78, 0xD4),
                },
                gutter: GutterTheme {
                    background: Rgb::new(0x2D, 0x2D, 0x30),
                    foreground: Rgb::new(0x85, 0x85, 0x85),
                },
                status_bar: StatusBarTheme {
                    background: Rgb::new(0x2B, 0x2B, 0x2B),
                    foreground: Rgb::new(0xCC, 0xCC, 0xCC),
                },
                image_highlight: ImageHighlightTheme {
                    background: Rgb::new(0x00, 0x78, 0xD4),
                    border: Rgb::new(0xFF, 0xFF, 0xFF),
                },
                syntax: SyntaxTheme {
                    keyword: Rgb::new(0x56, 0x9C, 0xD6),
                    string: Rgb::new(0xCE, 0x91, 0x78),
                    comment: Rgb::new(0x6A, 0x99, 0x55),
                    number: Rgb::new(0xB5, 0xCE, 0xA8),
                    function: Rgb::new(0xDC, 0xDC, 0xAA),
                },
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_parse() {
        for builtin in BUILTIN_THEMES {
            let theme = Theme::from_builtin(builtin.id).unwrap();
            assert_eq!(theme.id, builtin.id);
        }
    }

    #[test]
    fn test_dark_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.editor.background.to_string(), "#1e1e1e");
        assert_eq!(theme.syntax.color(SyntaxKind::Keyword).to_string(), "#569cd6");
        assert_eq!(theme.gutter.background.to_string(), "#2d2d30");
        assert_eq!(theme.status_bar.foreground.to_string(), "#cccccc");
    }

    #[test]
    fn test_light_colors() {
        let theme = Theme::from_builtin("light").unwrap();
        assert_eq!(theme.editor.background.to_string(), "#ffffff");
        assert_eq!(theme.syntax.function.to_string(), "#800080");
        assert_eq!(theme.gutter.background.to_string(), "#f5f5f5");
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(Theme::from_builtin("solarized").is_err());
    }

    #[test]
    fn test_title_capitalizes_id() {
        let mut theme = Theme::dark();
        theme.id = "system".to_string();
        assert_eq!(theme.title(), "System");
    }

    #[test]
    fn test_resolve_passes_concrete_ids() {
        assert_eq!(resolve_theme_id("light"), "light");
        assert_eq!(resolve_theme_id("dark"), "dark");
    }
}
