//! Named style ranges ("tags") attached to spans of the text buffer
//!
//! Tags of different kinds may cover the same offsets (bold + color at once).
//! Ranges of the same tag are kept merged, so the table never holds two
//! overlapping or touching ranges for one tag.

use std::fmt;
use std::str::FromStr;

use crate::model::formatting::Rgb;
use crate::syntax::SyntaxKind;

/// A style tag. The string form (`bold`, `size_14`, `color_ff0000`, ...) is
/// the stable identifier used by the view layer and tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Bold,
    Italic,
    Underline,
    Size(u16),
    Color(Rgb),
    Highlight(Rgb),
    /// Syntax highlighting, separate namespace from formatting
    Syntax(SyntaxKind),
    /// Short-lived highlight over a pasted image slot
    ImageHighlight(u64),
}

/// Groups of tags that compete for the same visual attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFamily {
    Bold,
    Italic,
    Underline,
    Size,
    Color,
    Highlight,
    Syntax,
    Transient,
}

impl Tag {
    pub fn family(&self) -> TagFamily {
        match self {
            Tag::Bold => TagFamily::Bold,
            Tag::Italic => TagFamily::Italic,
            Tag::Underline => TagFamily::Underline,
            Tag::Size(_) => TagFamily::Size,
            Tag::Color(_) => TagFamily::Color,
            Tag::Highlight(_) => TagFamily::Highlight,
            Tag::Syntax(_) => TagFamily::Syntax,
            Tag::ImageHighlight(_) => TagFamily::Transient,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Tag::Syntax(_))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Bold => write!(f, "bold"),
            Tag::Italic => write!(f, "italic"),
            Tag::Underline => write!(f, "underline"),
            Tag::Size(n) => write!(f, "size_{}", n),
            Tag::Color(c) => write!(f, "color_{}", c.to_hex()),
            Tag::Highlight(c) => write!(f, "highlight_{}", c.to_hex()),
            Tag::Syntax(kind) => write!(f, "{}", kind.name()),
            Tag::ImageHighlight(n) => write!(f, "image_highlight_{}", n),
        }
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bold" => return Ok(Tag::Bold),
            "italic" => return Ok(Tag::Italic),
            "underline" => return Ok(Tag::Underline),
            _ => {}
        }
        if let Some(kind) = SyntaxKind::from_name(s) {
            return Ok(Tag::Syntax(kind));
        }
        if let Some(rest) = s.strip_prefix("image_highlight_") {
            return rest
                .parse()
                .map(Tag::ImageHighlight)
                .map_err(|_| format!("Invalid tag: {}", s));
        }
        if let Some(rest) = s.strip_prefix("size_") {
            return rest
                .parse()
                .map(Tag::Size)
                .map_err(|_| format!("Invalid tag: {}", s));
        }
        if let Some(rest) = s.strip_prefix("color_") {
            return Rgb::from_hex(rest).map(Tag::Color);
        }
        if let Some(rest) = s.strip_prefix("highlight_") {
            return Rgb::from_hex(rest).map(Tag::Highlight);
        }
        Err(format!("Invalid tag: {}", s))
    }
}

/// A tag covering `[start, end)` in character offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRange {
    pub tag: Tag,
    pub start: usize,
    pub end: usize,
    /// Application order; later ranges win when tags of one family overlap
    pub seq: u64,
}

impl StyleRange {
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    fn overlaps_or_touches(&self, start: usize, end: usize) -> bool {
        self.start <= end && start <= self.end
    }
}

/// All style ranges of a buffer
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    ranges: Vec<StyleRange>,
    next_seq: u64,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleRange> {
        self.ranges.iter()
    }

    /// Cover `[start, end)` with `tag` as the most recently applied value.
    ///
    /// Ranges of the same tag that overlap or touch the span are merged into
    /// it, unless a later tag of the same family overlaps them: those keep
    /// their parts outside the span (and their order) and lose the rest.
    /// Adding coverage that already wins over the span is a no-op.
    pub fn add(&mut self, tag: Tag, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let settled: Vec<bool> = self.ranges.iter().map(|r| self.is_settled(r)).collect();
        if self
            .ranges
            .iter()
            .zip(&settled)
            .any(|(r, &ok)| ok && r.tag == tag && r.start <= start && end <= r.end)
        {
            return;
        }

        let mut merged_start = start;
        let mut merged_end = end;
        let mut kept = Vec::with_capacity(self.ranges.len() + 2);
        for (r, ok) in self.ranges.drain(..).zip(settled) {
            if r.tag != tag || !r.overlaps_or_touches(start, end) {
                kept.push(r);
            } else if ok {
                merged_start = merged_start.min(r.start);
                merged_end = merged_end.max(r.end);
            } else {
                if r.start < start {
                    kept.push(StyleRange {
                        tag: r.tag.clone(),
                        start: r.start,
                        end: r.end.min(start),
                        seq: r.seq,
                    });
                }
                if end < r.end {
                    kept.push(StyleRange {
                        tag: r.tag,
                        start: r.start.max(end),
                        end: r.end,
                        seq: r.seq,
                    });
                }
            }
        }
        self.ranges = kept;

        let seq = self.bump_seq();
        self.ranges.push(StyleRange {
            tag,
            start: merged_start,
            end: merged_end,
            seq,
        });
    }

    /// No other tag of `range`'s family applied after it overlaps it
    fn is_settled(&self, range: &StyleRange) -> bool {
        let family = range.tag.family();
        !self.ranges.iter().any(|o| {
            o.seq > range.seq
                && o.tag != range.tag
                && o.tag.family() == family
                && o.start < range.end
                && range.start < o.end
        })
    }

    /// Remove `tag` from `[start, end)`, splitting ranges that straddle the span
    pub fn remove(&mut self, tag: &Tag, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let mut kept = Vec::with_capacity(self.ranges.len());
        for r in self.ranges.drain(..) {
            if &r.tag != tag || r.end <= start || end <= r.start {
                kept.push(r);
                continue;
            }
            if r.start < start {
                kept.push(StyleRange {
                    tag: r.tag.clone(),
                    start: r.start,
                    end: start,
                    seq: r.seq,
                });
            }
            if end < r.end {
                kept.push(StyleRange {
                    tag: r.tag,
                    start: end,
                    end: r.end,
                    seq: r.seq,
                });
            }
        }
        self.ranges = kept;
    }

    /// Remove every range whose tag matches the predicate
    pub fn clear_where(&mut self, mut pred: impl FnMut(&Tag) -> bool) {
        self.ranges.retain(|r| !pred(&r.tag));
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Tags covering `offset`, sorted and deduplicated
    pub fn tags_at(&self, offset: usize) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .ranges
            .iter()
            .filter(|r| r.contains(offset))
            .map(|r| r.tag.clone())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// The most recently applied tag of `family` covering `offset`
    pub fn latest_at(&self, offset: usize, family: TagFamily) -> Option<&Tag> {
        self.ranges
            .iter()
            .filter(|r| r.tag.family() == family && r.contains(offset))
            .max_by_key(|r| r.seq)
            .map(|r| &r.tag)
    }

    /// Sorted `(start, end)` spans covered by `tag`
    pub fn ranges_of(&self, tag: &Tag) -> Vec<(usize, usize)> {
        let mut spans: Vec<(usize, usize)> = self
            .ranges
            .iter()
            .filter(|r| &r.tag == tag)
            .map(|r| (r.start, r.end))
            .collect();
        spans.sort_unstable();
        spans
    }

    /// Renumber after `len` characters were inserted at `offset`.
    ///
    /// Range starts at or after the insertion point move forward. Range ends
    /// move only when strictly after it, so text typed at a range's trailing
    /// edge does not join the range, while text inserted inside one does.
    pub fn shift_for_insert(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        for r in &mut self.ranges {
            if r.start >= offset {
                r.start += len;
                r.end += len;
            } else if r.end > offset {
                r.end += len;
            }
        }
    }

    /// Renumber after `[start, end)` was deleted; ranges inside it vanish
    pub fn shift_for_delete(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let len = end - start;
        let map = |x: usize| {
            if x <= start {
                x
            } else if x >= end {
                x - len
            } else {
                start
            }
        };
        for r in &mut self.ranges {
            r.start = map(r.start);
            r.end = map(r.end);
        }
        self.ranges.retain(|r| r.start < r.end);
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}
