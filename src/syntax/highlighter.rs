//! Regex-based highlighter producing syntax tags
//!
//! Every pass runs line by line over the whole buffer and is order-sensitive:
//! keywords, strings, comments, numbers, then function names. Spans from
//! different passes may overlap (a keyword inside a string keeps both tags);
//! the view layer resolves the paint order.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::languages::LanguageId;
use crate::model::buffer::TextBuffer;
use crate::model::tags::Tag;

/// Syntax tag kinds, in pass order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    Keyword,
    String,
    Comment,
    Number,
    Function,
}

impl SyntaxKind {
    pub const ALL: [SyntaxKind; 5] = [
        SyntaxKind::Keyword,
        SyntaxKind::String,
        SyntaxKind::Comment,
        SyntaxKind::Number,
        SyntaxKind::Function,
    ];

    /// Tag name used in the buffer
    pub fn name(&self) -> &'static str {
        match self {
            SyntaxKind::Keyword => "keyword",
            SyntaxKind::String => "string",
            SyntaxKind::Comment => "comment",
            SyntaxKind::Number => "number",
            SyntaxKind::Function => "function",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Which comment and function rules apply to a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightRules {
    /// `#` line comments and `def name` functions for every language
    #[default]
    Compatible,
    /// Comment and function patterns looked up per language
    PerLanguage,
}

/// A highlighted span in character offsets over the whole buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxSpan {
    pub kind: SyntaxKind,
    pub start: usize,
    pub end: usize,
}

const STRING_PATTERNS: [&str; 2] = [r#"".*?""#, r"'.*?'"];
const COMPAT_COMMENT: &str = r"#.*$";
const COMPAT_FUNCTION: &str = r"def\s+(\w+)";
const NUMBER_PATTERN: &str = r"\b\d+(\.\d+)?\b";

struct CompiledRules {
    keywords: Option<Regex>,
    strings: Vec<Regex>,
    comment: Option<Regex>,
    number: Option<Regex>,
    function: Option<Regex>,
}

impl CompiledRules {
    fn build(language: LanguageId, rules: HighlightRules) -> Self {
        let alternation = language
            .keywords()
            .iter()
            .map(|kw| regex::escape(kw))
            .collect::<Vec<_>>()
            .join("|");
        let (comment, function) = match rules {
            HighlightRules::Compatible => (Some(COMPAT_COMMENT), Some(COMPAT_FUNCTION)),
            HighlightRules::PerLanguage => (language.comment_pattern(), language.function_pattern()),
        };

        Self {
            keywords: compile(&format!(r"\b(?:{})\b", alternation)),
            strings: STRING_PATTERNS.iter().filter_map(|p| compile(p)).collect(),
            comment: comment.and_then(compile),
            number: compile(NUMBER_PATTERN),
            function: function.and_then(compile),
        }
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Skipping highlight pattern {:?}: {}", pattern, e);
            None
        }
    }
}

/// Highlighter with compiled patterns cached per language and rule set.
///
/// The output depends only on the text and language; the cache just avoids
/// recompiling the keyword alternation on every keystroke.
#[derive(Default)]
pub struct Highlighter {
    cache: HashMap<(LanguageId, HighlightRules), CompiledRules>,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute syntax spans for `text`, in pass order per line
    pub fn spans(
        &mut self,
        text: &str,
        language: LanguageId,
        rules: HighlightRules,
    ) -> Vec<SyntaxSpan> {
        let compiled = self
            .cache
            .entry((language, rules))
            .or_insert_with(|| CompiledRules::build(language, rules));

        let mut spans = Vec::new();
        let mut line_start = 0usize;
        for line in text.split('\n') {
            highlight_line(compiled, line, line_start, &mut spans);
            line_start += line.chars().count() + 1;
        }
        spans
    }

    /// Replace all syntax tags in `buffer` with a fresh highlighting pass.
    /// Returns the number of spans tagged.
    pub fn apply(
        &mut self,
        buffer: &mut TextBuffer,
        language: LanguageId,
        rules: HighlightRules,
    ) -> usize {
        clear_highlighting(buffer);
        let spans = self.spans(&buffer.text(), language, rules);
        for span in &spans {
            buffer.add_tag(Tag::Syntax(span.kind), span.start, span.end);
        }
        tracing::trace!(
            "Highlighted {} spans ({}, {:?})",
            spans.len(),
            language.display_name(),
            rules
        );
        spans.len()
    }
}

/// Remove every syntax tag, leaving formatting tags alone
pub fn clear_highlighting(buffer: &mut TextBuffer) {
    buffer.clear_tags_where(Tag::is_syntax);
}

fn highlight_line(rules: &CompiledRules, line: &str, line_start: usize, out: &mut Vec<SyntaxSpan>) {
    let to_char = CharIndex::new(line);
    let mut push = |kind: SyntaxKind, start: usize, end: usize| {
        if start < end {
            out.push(SyntaxSpan {
                kind,
                start: line_start + to_char.at(start),
                end: line_start + to_char.at(end),
            });
        }
    };

    if let Some(re) = &rules.keywords {
        for m in re.find_iter(line) {
            push(SyntaxKind::Keyword, m.start(), m.end());
        }
    }
    for re in &rules.strings {
        for m in re.find_iter(line) {
            push(SyntaxKind::String, m.start(), m.end());
        }
    }
    // One comment and one function definition per line at most
    if let Some(m) = rules.comment.as_ref().and_then(|re| re.find(line)) {
        push(SyntaxKind::Comment, m.start(), m.end());
    }
    if let Some(re) = &rules.number {
        for m in re.find_iter(line) {
            push(SyntaxKind::Number, m.start(), m.end());
        }
    }
    if let Some(name) = rules
        .function
        .as_ref()
        .and_then(|re| re.captures(line))
        .and_then(|caps| caps.get(1))
    {
        push(SyntaxKind::Function, name.start(), name.end());
    }
}

/// Byte offset to char offset lookup for one line
struct CharIndex<'a> {
    line: &'a str,
    ascii: bool,
}

impl<'a> CharIndex<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            line,
            ascii: line.is_ascii(),
        }
    }

    fn at(&self, byte: usize) -> usize {
        if self.ascii {
            byte
        } else {
            self.line[..byte].chars().count()
        }
    }
}
