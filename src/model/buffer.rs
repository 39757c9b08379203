//! Tagged text buffer: characters, style ranges and embedded images
//!
//! All offsets are character offsets into the rope. Every mutation keeps
//! tag ranges and image slots valid by renumbering them.

use std::collections::BTreeMap;
use std::ops::Range;

use ropey::Rope;

use super::tags::{StyleRange, Tag, TagTable};
use crate::error::EditorError;
use crate::image::EmbeddedImage;

/// Placeholder character occupying an image's slot in the rope
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    tags: TagTable,
    images: BTreeMap<usize, EmbeddedImage>,
    next_image_id: u64,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::default()
        }
    }

    /// Replace the entire content; drops all tags and images
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.tags.clear();
        self.images.clear();
    }

    // === Content access ===

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Text in a character range (clamped to the buffer)
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.rope.slice(start..end).to_string()
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.len_chars()).then(|| self.rope.char(offset))
    }

    /// Number of lines (always >= 1)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without the trailing newline
    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Length of a line in characters (excluding newline)
    pub fn line_length(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line_idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            if len > 1 && line.char(len - 2) == '\r' {
                len - 2
            } else {
                len - 1
            }
        } else {
            len
        }
    }

    pub fn line_start(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return self.len_chars();
        }
        self.rope.line_to_char(line_idx)
    }

    /// Offset just before the newline of the line containing `offset`
    pub fn line_end_of(&self, offset: usize) -> usize {
        let (line, _) = self.offset_to_position(offset);
        self.line_start(line) + self.line_length(line)
    }

    /// Convert a character offset to (line, column), both 0-indexed
    pub fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.len_chars());
        let line = self.rope.char_to_line(clamped);
        (line, clamped - self.rope.line_to_char(line))
    }

    /// Convert (line, column) to a character offset, clamping the column to the line
    pub fn position_to_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.len_chars();
        }
        self.rope.line_to_char(line) + column.min(self.line_length(line))
    }

    // === Mutation ===

    /// Insert text at `offset` (clamped to `[0, len]`). Returns the offset used.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        let offset = offset.min(self.len_chars());
        let len = text.chars().count();
        if len == 0 {
            return offset;
        }
        self.rope.insert(offset, text);
        self.tags.shift_for_insert(offset, len);
        self.shift_images(offset, len as isize);
        offset
    }

    /// Insert an image at `offset` (clamped). Returns (offset, image id).
    pub fn insert_image(&mut self, offset: usize, mut image: EmbeddedImage) -> (usize, u64) {
        let offset = offset.min(self.len_chars());
        self.next_image_id += 1;
        image.id = self.next_image_id;
        let id = image.id;

        self.rope.insert_char(offset, OBJECT_REPLACEMENT);
        self.tags.shift_for_insert(offset, 1);
        self.shift_images(offset, 1);
        self.images.insert(offset, image);
        (offset, id)
    }

    /// Delete `[start, end)`, returning the removed text.
    ///
    /// Requires `start <= end <= len`. Tag ranges inside the span are
    /// truncated or removed and images in it are dropped.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<String, EditorError> {
        let len = self.len_chars();
        if start > end || end > len {
            return Err(EditorError::InvalidRange { start, end, len });
        }
        if start == end {
            return Ok(String::new());
        }

        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.tags.shift_for_delete(start, end);

        let dropped: Vec<usize> = self.images.range(start..end).map(|(k, _)| *k).collect();
        for key in dropped {
            self.images.remove(&key);
        }
        self.shift_images(end, -((end - start) as isize));
        Ok(removed)
    }

    fn shift_images(&mut self, from: usize, delta: isize) {
        if delta == 0 || self.images.range(from..).next().is_none() {
            return;
        }
        let moved: Vec<(usize, EmbeddedImage)> = {
            let keys: Vec<usize> = self.images.range(from..).map(|(k, _)| *k).collect();
            keys.into_iter()
                .filter_map(|k| self.images.remove(&k).map(|img| (k, img)))
                .collect()
        };
        for (key, img) in moved {
            let new_key = (key as isize + delta).max(0) as usize;
            self.images.insert(new_key, img);
        }
    }

    // === Tags ===

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    /// Every tag covering `offset`
    pub fn tag_names_at(&self, offset: usize) -> Vec<Tag> {
        self.tags.tags_at(offset)
    }

    /// Add `tag` over `[start, end)` (clamped to the buffer)
    pub fn add_tag(&mut self, tag: Tag, start: usize, end: usize) {
        let len = self.len_chars();
        self.tags.add(tag, start.min(len), end.min(len));
    }

    pub fn remove_tag(&mut self, tag: &Tag, start: usize, end: usize) {
        let len = self.len_chars();
        self.tags.remove(tag, start.min(len), end.min(len));
    }

    pub fn clear_tags_where(&mut self, pred: impl FnMut(&Tag) -> bool) {
        self.tags.clear_where(pred);
    }

    pub fn ranges_of(&self, tag: &Tag) -> Vec<(usize, usize)> {
        self.tags.ranges_of(tag)
    }

    /// Style ranges intersecting `[start, end)`
    pub fn ranges_in(&self, start: usize, end: usize) -> Vec<&StyleRange> {
        self.tags
            .iter()
            .filter(|r| r.start < end && start < r.end)
            .collect()
    }

    // === Images ===

    pub fn image_at(&self, offset: usize) -> Option<&EmbeddedImage> {
        self.images.get(&offset)
    }

    pub fn images(&self) -> impl Iterator<Item = (usize, &EmbeddedImage)> {
        self.images.iter().map(|(k, v)| (*k, v))
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_image() -> EmbeddedImage {
        EmbeddedImage::from_rgba(2, 2, vec![0u8; 16], (400, 300)).unwrap()
    }

    #[test]
    fn test_insert_clamps_offset() {
        let mut buf = TextBuffer::from_text("abc");
        let at = buf.insert(99, "d");
        assert_eq!(at, 3);
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_insert_shifts_following_tags() {
        let mut buf = TextBuffer::from_text("hello world");
        buf.add_tag(Tag::Bold, 6, 11);
        buf.insert(0, ">> ");
        assert_eq!(buf.ranges_of(&Tag::Bold), vec![(9, 14)]);
        assert_eq!(buf.slice(9..14), "world");
    }

    #[test]
    fn test_delete_requires_valid_range() {
        let mut buf = TextBuffer::from_text("abc");
        assert!(matches!(
            buf.delete(2, 1),
            Err(EditorError::InvalidRange { .. })
        ));
        assert!(buf.delete(0, 4).is_err());
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_delete_returns_removed_text() {
        let mut buf = TextBuffer::from_text("hello world");
        let removed = buf.delete(5, 11).unwrap();
        assert_eq!(removed, " world");
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_then_reinsert_restores_outside_tags() {
        let mut buf = TextBuffer::from_text("one two three");
        buf.add_tag(Tag::Bold, 0, 3);
        buf.add_tag(Tag::Italic, 8, 13);
        let before_bold = buf.ranges_of(&Tag::Bold);
        let before_italic = buf.ranges_of(&Tag::Italic);

        let removed = buf.delete(4, 7).unwrap();
        buf.insert(4, &removed);

        assert_eq!(buf.text(), "one two three");
        assert_eq!(buf.ranges_of(&Tag::Bold), before_bold);
        assert_eq!(buf.ranges_of(&Tag::Italic), before_italic);
    }

    #[test]
    fn test_image_occupies_one_slot() {
        let mut buf = TextBuffer::from_text("ab");
        let (at, id) = buf.insert_image(1, tiny_image());
        assert_eq!(at, 1);
        assert_eq!(buf.len_chars(), 3);
        assert_eq!(buf.char_at(1), Some(OBJECT_REPLACEMENT));
        assert_eq!(buf.image_at(1).map(|img| img.id), Some(id));
    }

    #[test]
    fn test_image_moves_with_edits_and_dies_with_its_slot() {
        let mut buf = TextBuffer::from_text("ab");
        buf.insert_image(2, tiny_image());
        buf.insert(0, "xx");
        assert!(buf.image_at(4).is_some());

        buf.delete(0, 1).unwrap();
        assert!(buf.image_at(3).is_some());

        buf.delete(3, 4).unwrap();
        assert_eq!(buf.image_count(), 0);
    }

    #[test]
    fn test_position_conversions() {
        let buf = TextBuffer::from_text("first\nsecond\nthird");
        assert_eq!(buf.offset_to_position(8), (1, 2));
        assert_eq!(buf.position_to_offset(1, 2), 8);
        assert_eq!(buf.position_to_offset(0, 99), 5);
        assert_eq!(buf.line_end_of(7), 12);
        assert_eq!(buf.line(2).as_deref(), Some("third"));
    }

    #[test]
    fn test_set_text_drops_tags() {
        let mut buf = TextBuffer::from_text("abc");
        buf.add_tag(Tag::Bold, 0, 3);
        buf.set_text("new");
        assert!(buf.tags().is_empty());
        assert_eq!(buf.text(), "new");
    }
}
