//! Syntax highlighting module
//!
//! Regex highlighting for code mode:
//! - Language table (display names, extensions, keyword lists)
//! - Line-by-line highlighting passes producing syntax tags
//!
//! ## Flow
//!
//! ```text
//! Edit in code mode → Highlighter::apply(buffer, language, rules)
//!                   → clear syntax tags → re-tag whole buffer
//! ```

mod highlighter;
mod languages;

pub use highlighter::{clear_highlighting, HighlightRules, Highlighter, SyntaxKind, SyntaxSpan};
pub use languages::LanguageId;
