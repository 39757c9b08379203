//! Pending formatting state ("the stamp" for newly typed characters)

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tags::{Tag, TagFamily, TagTable};

/// Font size the text view starts with; sizes equal to it are never stamped
pub const DEFAULT_FONT_SIZE: u16 = 12;

/// Opaque RGB color as produced by a color picker.
/// Serialized as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from "#RRGGBB" or "RRGGBB"
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("Invalid color {}: {}", s, e))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase hex without the leading '#', as used in tag names
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// What happens to existing size/color/highlight tags when a new value is
/// applied over a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormattingPolicy {
    /// Remove other tags of the same family over the span first
    #[default]
    Replace,
    /// Leave old tags in place; the most recently applied one wins on read
    Accumulate,
}

/// Formatting applied to the next typed character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size: u16,
    pub color: Option<Rgb>,
    pub highlight: Option<Rgb>,
}

impl Default for FormattingState {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            size: DEFAULT_FONT_SIZE,
            color: None,
            highlight: None,
        }
    }
}

impl FormattingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with a different starting font size
    pub fn with_size(size: u16) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Read the formatting active at `offset`, starting from defaults.
    ///
    /// When several tags of one family cover the offset, the most recently
    /// applied one decides the value.
    pub fn from_tags_at(tags: &TagTable, offset: usize) -> Self {
        let mut state = Self::default();
        state.refresh_from(tags, offset);
        state
    }

    /// Sync with the tags under the caret.
    ///
    /// Boolean attributes always follow the caret. Size and colors are only
    /// overwritten when a matching tag is present, so a size picked in the
    /// toolbar survives moving over unsized text.
    pub fn refresh_from(&mut self, tags: &TagTable, offset: usize) {
        self.bold = tags.latest_at(offset, TagFamily::Bold).is_some();
        self.italic = tags.latest_at(offset, TagFamily::Italic).is_some();
        self.underline = tags.latest_at(offset, TagFamily::Underline).is_some();
        if let Some(Tag::Size(n)) = tags.latest_at(offset, TagFamily::Size) {
            self.size = *n;
        }
        if let Some(Tag::Color(c)) = tags.latest_at(offset, TagFamily::Color) {
            self.color = Some(*c);
        }
        if let Some(Tag::Highlight(c)) = tags.latest_at(offset, TagFamily::Highlight) {
            self.highlight = Some(*c);
        }
    }

    /// The tags a newly typed character receives
    pub fn stamp_tags(&self) -> Vec<Tag> {
        let mut tags = Vec::new();
        if self.bold {
            tags.push(Tag::Bold);
        }
        if self.italic {
            tags.push(Tag::Italic);
        }
        if self.underline {
            tags.push(Tag::Underline);
        }
        if self.size != DEFAULT_FONT_SIZE {
            tags.push(Tag::Size(self.size));
        }
        if let Some(color) = self.color {
            tags.push(Tag::Color(color));
        }
        if let Some(highlight) = self.highlight {
            tags.push(Tag::Highlight(highlight));
        }
        tags
    }

    /// Value of a boolean attribute by tag
    pub fn flag(&self, tag: &Tag) -> bool {
        match tag {
            Tag::Bold => self.bold,
            Tag::Italic => self.italic,
            Tag::Underline => self.underline,
            _ => false,
        }
    }

    pub fn set_flag(&mut self, tag: &Tag, value: bool) {
        match tag {
            Tag::Bold => self.bold = value,
            Tag::Italic => self.italic = value,
            Tag::Underline => self.underline = value,
            _ => {}
        }
    }
}
