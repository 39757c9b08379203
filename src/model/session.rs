//! Editing session: caret, selection and pending formatting over a TextBuffer
//!
//! Edits go through here so the buffer's tags, the caret and the pending
//! formatting stay consistent. Highlighting is not triggered from here; the
//! update layer re-runs it after edits in code mode.

use super::buffer::TextBuffer;
use super::formatting::{FormattingPolicy, FormattingState, Rgb, DEFAULT_FONT_SIZE};
use super::tags::{Tag, TagFamily};
use crate::error::EditorError;
use crate::image::EmbeddedImage;

/// A text selection in character offsets.
/// The anchor stays fixed while the head (the caret) moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret with no selection)
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }
}

/// Result of pasting an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastedImage {
    /// Offset of the image slot
    pub offset: usize,
    /// Buffer-unique image id
    pub id: u64,
    /// Whether a transient highlight tag was applied over the slot
    pub highlighted: bool,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    pub buffer: TextBuffer,
    selection: Selection,
    pub formatting: FormattingState,
    pub policy: FormattingPolicy,
    /// Stamp pending formatting onto typed characters (off in code mode)
    pub stamping: bool,
    /// Font size pending formatting starts from after a load or reset
    default_size: u16,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            buffer: TextBuffer::new(),
            selection: Selection::default(),
            formatting: FormattingState::default(),
            policy: FormattingPolicy::default(),
            stamping: true,
            default_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            ..Self::default()
        }
    }

    /// Replace the whole buffer (open/new); caret and formatting reset
    pub fn load_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.selection = Selection::default();
        self.formatting = FormattingState::with_size(self.default_size);
    }

    pub fn default_size(&self) -> u16 {
        self.default_size
    }

    /// Change the starting font size, applying it to the pending formatting
    pub fn set_default_size(&mut self, size: u16) {
        self.default_size = size;
        self.formatting.size = size;
    }

    // === Caret & selection ===

    pub fn caret(&self) -> usize {
        self.selection.head
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The selected span, if non-empty
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        (!self.selection.is_empty()).then(|| (self.selection.start(), self.selection.end()))
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Move the caret (clearing the selection) and sync pending formatting
    /// with the tags under it
    pub fn set_caret(&mut self, offset: usize) {
        let offset = offset.min(self.buffer.len_chars());
        self.selection = Selection::collapsed(offset);
        self.update_current_formatting();
    }

    /// Select from `anchor` to `head`; the caret ends up at `head`
    pub fn select(&mut self, anchor: usize, head: usize) {
        let len = self.buffer.len_chars();
        self.selection = Selection::new(anchor.min(len), head.min(len));
        self.update_current_formatting();
    }

    pub fn select_all(&mut self) {
        self.select(0, self.buffer.len_chars());
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection_range()
            .map(|(start, end)| self.buffer.slice(start..end))
    }

    /// 0-indexed (line, column) of the caret
    pub fn caret_position(&self) -> (usize, usize) {
        self.buffer.offset_to_position(self.caret())
    }

    /// Status bar text: `Line L, Column C | Total Lines: N` (1-based)
    pub fn cursor_status(&self) -> String {
        let (line, column) = self.caret_position();
        format!(
            "Line {}, Column {} | Total Lines: {}",
            line + 1,
            column + 1,
            self.buffer.line_count()
        )
    }

    /// Sync pending formatting with the tags at the caret
    pub fn update_current_formatting(&mut self) {
        let caret = self.caret();
        self.formatting.refresh_from(self.buffer.tags(), caret);
    }

    /// Reset pending formatting to what is applied at `offset`
    pub fn inherit_formatting_from(&mut self, offset: usize) {
        self.formatting = FormattingState::from_tags_at(self.buffer.tags(), offset);
    }

    // === Editing ===

    /// Type one character, replacing the selection if there is one.
    ///
    /// Replacing a selection first inherits the formatting at its start, so
    /// the new character looks like the text it replaced.
    pub fn type_character(&mut self, ch: char) -> Result<(), EditorError> {
        let offset = self.take_selection(true)?;
        let mut utf8 = [0u8; 4];
        let at = self.buffer.insert(offset, ch.encode_utf8(&mut utf8));
        if self.stamping {
            self.stamp(at, at + 1);
        }
        self.selection = Selection::collapsed(at + 1);
        Ok(())
    }

    /// Return key: a newline carrying no stamp
    pub fn insert_newline(&mut self) -> Result<(), EditorError> {
        let offset = self.take_selection(true)?;
        let at = self.buffer.insert(offset, "\n");
        self.selection = Selection::collapsed(at + 1);
        Ok(())
    }

    /// Delete the selection, or the character before the caret.
    /// Returns false when there was nothing to delete.
    pub fn backspace(&mut self) -> Result<bool, EditorError> {
        if self.has_selection() {
            self.take_selection(true)?;
            return Ok(true);
        }
        let caret = self.caret();
        if caret == 0 {
            return Ok(false);
        }
        self.buffer.delete(caret - 1, caret)?;
        self.selection = Selection::collapsed(caret - 1);
        Ok(true)
    }

    /// Delete the selection, or the character after the caret.
    /// Returns false when there was nothing to delete.
    pub fn delete_forward(&mut self) -> Result<bool, EditorError> {
        if self.has_selection() {
            self.take_selection(true)?;
            return Ok(true);
        }
        let caret = self.caret();
        if caret >= self.buffer.len_chars() {
            return Ok(false);
        }
        self.buffer.delete(caret, caret + 1)?;
        Ok(true)
    }

    /// Insert raw text at the caret without stamping
    pub fn paste_text(&mut self, text: &str) -> Result<(), EditorError> {
        let offset = self.take_selection(false)?;
        let at = self.buffer.insert(offset, text);
        self.selection = Selection::collapsed(at + text.chars().count());
        Ok(())
    }

    /// Insert an image on its own line.
    ///
    /// A newline goes in first when the caret sits after non-blank text on
    /// its line. After the image the caret moves to the end of that line and
    /// a newline is inserted so typing continues below the image.
    /// With `highlight`, the slot gets an `image_highlight_<id>` tag the
    /// caller is expected to remove later via [`Self::remove_transient_highlight`].
    pub fn paste_image(
        &mut self,
        image: EmbeddedImage,
        highlight: bool,
    ) -> Result<PastedImage, EditorError> {
        let mut caret = self.take_selection(false)?;

        let (line, column) = self.buffer.offset_to_position(caret);
        if column > 0 {
            let before = self.buffer.slice(self.buffer.line_start(line)..caret);
            if !before.trim().is_empty() {
                caret = self.buffer.insert(caret, "\n") + 1;
            }
        }

        let (offset, id) = self.buffer.insert_image(caret, image);
        let line_end = self.buffer.line_end_of(offset + 1);
        let newline_at = self.buffer.insert(line_end, "\n");
        self.selection = Selection::collapsed(newline_at + 1);

        if highlight {
            self.buffer.add_tag(Tag::ImageHighlight(id), offset, offset + 1);
        }
        tracing::debug!("Pasted image {} at offset {}", id, offset);

        Ok(PastedImage {
            offset,
            id,
            highlighted: highlight,
        })
    }

    /// Drop the transient highlight of a pasted image, wherever its slot moved
    pub fn remove_transient_highlight(&mut self, id: u64) {
        let tag = Tag::ImageHighlight(id);
        self.buffer.clear_tags_where(|t| *t == tag);
    }

    /// Selected text, if any
    pub fn copy(&self) -> Option<String> {
        self.selected_text()
    }

    /// Remove and return the selected text (inheriting its formatting)
    pub fn cut(&mut self) -> Result<Option<String>, EditorError> {
        let Some(text) = self.selected_text() else {
            return Ok(None);
        };
        self.take_selection(true)?;
        Ok(Some(text))
    }

    // === Formatting ===

    pub fn toggle_bold(&mut self) {
        self.toggle(Tag::Bold);
    }

    pub fn toggle_italic(&mut self) {
        self.toggle(Tag::Italic);
    }

    pub fn toggle_underline(&mut self) {
        self.toggle(Tag::Underline);
    }

    /// Flip a boolean attribute.
    ///
    /// With a selection, the tags at its start decide: present means remove
    /// over the whole span, absent means add over it. Without a selection
    /// only the pending flag flips.
    fn toggle(&mut self, tag: Tag) {
        match self.selection_range() {
            Some((start, end)) => {
                let present = self.buffer.tag_names_at(start).contains(&tag);
                if present {
                    self.buffer.remove_tag(&tag, start, end);
                } else {
                    self.buffer.add_tag(tag.clone(), start, end);
                }
                self.formatting.set_flag(&tag, !present);
                self.restore_selection(start, end);
            }
            None => {
                let value = !self.formatting.flag(&tag);
                self.formatting.set_flag(&tag, value);
            }
        }
    }

    pub fn change_font_size(&mut self, size: u16) {
        self.formatting.size = size;
        self.apply_to_selection(Tag::Size(size));
    }

    pub fn change_text_color(&mut self, color: Rgb) {
        self.formatting.color = Some(color);
        self.apply_to_selection(Tag::Color(color));
    }

    pub fn change_highlight_color(&mut self, color: Rgb) {
        self.formatting.highlight = Some(color);
        self.apply_to_selection(Tag::Highlight(color));
    }

    fn apply_to_selection(&mut self, tag: Tag) {
        let Some((start, end)) = self.selection_range() else {
            return;
        };
        if self.policy == FormattingPolicy::Replace {
            self.remove_family(tag.family(), start, end);
        }
        self.buffer.add_tag(tag, start, end);
        self.restore_selection(start, end);
    }

    // === Internals ===

    /// Add the pending formatting over `[start, end)`
    fn stamp(&mut self, start: usize, end: usize) {
        for tag in self.formatting.stamp_tags() {
            if self.policy == FormattingPolicy::Replace
                && matches!(
                    tag.family(),
                    TagFamily::Size | TagFamily::Color | TagFamily::Highlight
                )
            {
                self.remove_family(tag.family(), start, end);
            }
            self.buffer.add_tag(tag, start, end);
        }
    }

    fn remove_family(&mut self, family: TagFamily, start: usize, end: usize) {
        let mut stale: Vec<Tag> = self
            .buffer
            .ranges_in(start, end)
            .into_iter()
            .filter(|r| r.tag.family() == family)
            .map(|r| r.tag.clone())
            .collect();
        stale.sort();
        stale.dedup();
        for tag in stale {
            self.buffer.remove_tag(&tag, start, end);
        }
    }

    /// Delete the selection if there is one and return where insertion
    /// should happen (the old selection start, or the caret)
    fn take_selection(&mut self, inherit: bool) -> Result<usize, EditorError> {
        let Some((start, end)) = self.selection_range() else {
            return Ok(self.caret());
        };
        if inherit {
            self.inherit_formatting_from(start);
        }
        self.buffer.delete(start, end)?;
        self.selection = Selection::collapsed(start);
        Ok(start)
    }

    /// Re-select a span after formatting it, caret at its end
    fn restore_selection(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::formatting::DEFAULT_FONT_SIZE;

    fn image(w: u32, h: u32) -> EmbeddedImage {
        EmbeddedImage::from_rgba(w, h, vec![0u8; (w * h * 4) as usize], (400, 300)).unwrap()
    }

    #[test]
    fn test_type_character_stamps_active_attributes() {
        let mut session = EditSession::new();
        session.formatting.bold = true;
        session.formatting.size = 14;
        session.type_character('A').unwrap();

        assert_eq!(session.buffer.text(), "A");
        assert_eq!(session.buffer.tag_names_at(0), vec![Tag::Bold, Tag::Size(14)]);
        assert_eq!(session.buffer.ranges_of(&Tag::Bold), vec![(0, 1)]);
        assert_eq!(session.buffer.ranges_of(&Tag::Size(14)), vec![(0, 1)]);
        assert_eq!(session.caret(), 1);
    }

    #[test]
    fn test_type_character_without_stamping() {
        let mut session = EditSession::new();
        session.stamping = false;
        session.formatting.bold = true;
        session.type_character('x').unwrap();
        assert!(session.buffer.tags().is_empty());
    }

    #[test]
    fn test_consecutive_typing_extends_bold_run() {
        let mut session = EditSession::new();
        session.toggle_bold();
        for ch in "abc".chars() {
            session.type_character(ch).unwrap();
        }
        assert_eq!(session.buffer.ranges_of(&Tag::Bold), vec![(0, 3)]);
    }

    #[test]
    fn test_type_over_selection_inherits_start_formatting() {
        let mut session = EditSession::with_text("hello world");
        session.buffer.add_tag(Tag::Italic, 6, 11);
        session.formatting.bold = true;
        session.select(6, 11);
        session.type_character('W').unwrap();

        assert_eq!(session.buffer.text(), "hello W");
        assert!(session.formatting.italic);
        assert!(!session.formatting.bold);
        assert_eq!(session.buffer.ranges_of(&Tag::Italic), vec![(6, 7)]);
    }

    #[test]
    fn test_toggle_bold_twice_on_selection() {
        let mut session = EditSession::with_text("hello");
        session.select(0, 5);
        session.toggle_bold();
        assert_eq!(session.buffer.ranges_of(&Tag::Bold), vec![(0, 5)]);
        assert!(session.formatting.bold);
        assert_eq!(session.selection_range(), Some((0, 5)));
        assert_eq!(session.caret(), 5);

        session.toggle_bold();
        assert!(session.buffer.ranges_of(&Tag::Bold).is_empty());
        assert!(!session.formatting.bold);
    }

    #[test]
    fn test_toggle_decides_from_selection_start() {
        let mut session = EditSession::with_text("abcdef");
        session.buffer.add_tag(Tag::Underline, 3, 6);
        session.select(0, 6);
        session.toggle_underline();
        assert_eq!(session.buffer.ranges_of(&Tag::Underline), vec![(0, 6)]);
    }

    #[test]
    fn test_toggle_without_selection_flips_pending_flag() {
        let mut session = EditSession::with_text("abc");
        session.toggle_italic();
        assert!(session.formatting.italic);
        assert!(session.buffer.tags().is_empty());
        session.toggle_italic();
        assert!(!session.formatting.italic);
    }

    #[test]
    fn test_backspace_and_delete_at_edges() {
        let mut session = EditSession::with_text("ab");
        session.set_caret(0);
        assert!(!session.backspace().unwrap());
        session.set_caret(2);
        assert!(!session.delete_forward().unwrap());
        assert!(session.backspace().unwrap());
        assert_eq!(session.buffer.text(), "a");
        assert_eq!(session.caret(), 1);
    }

    #[test]
    fn test_backspace_keeps_formatting_without_selection() {
        let mut session = EditSession::with_text("ab");
        session.set_caret(2);
        session.formatting.underline = true;
        session.backspace().unwrap();
        assert!(session.formatting.underline);
    }

    #[test]
    fn test_delete_selection_inherits() {
        let mut session = EditSession::with_text("plain BOLD");
        session.buffer.add_tag(Tag::Bold, 6, 10);
        session.select(6, 10);
        session.formatting.bold = false;
        session.delete_forward().unwrap();
        assert_eq!(session.buffer.text(), "plain ");
        assert!(session.formatting.bold);
    }

    #[test]
    fn test_paste_text_is_formatting_neutral() {
        let mut session = EditSession::with_text("ab");
        session.formatting.bold = true;
        session.set_caret(2);
        session.formatting.bold = true;
        session.paste_text("cd").unwrap();
        assert_eq!(session.buffer.text(), "abcd");
        assert!(session.buffer.tags().is_empty());
        assert_eq!(session.caret(), 4);
    }

    #[test]
    fn test_paste_text_replaces_selection() {
        let mut session = EditSession::with_text("one two");
        session.select(4, 7);
        session.paste_text("2").unwrap();
        assert_eq!(session.buffer.text(), "one 2");
    }

    #[test]
    fn test_paste_image_mid_line_breaks_line() {
        let mut session = EditSession::with_text("caption");
        session.set_caret(7);
        let pasted = session.paste_image(image(800, 600), true).unwrap();

        assert_eq!(pasted.offset, 8);
        assert_eq!(session.buffer.text(), "caption\n\u{FFFC}\n");
        assert_eq!(session.caret(), 10);
        let img = session.buffer.image_at(8).unwrap();
        assert_eq!((img.width, img.height), (400, 300));
        assert_eq!(
            session.buffer.ranges_of(&Tag::ImageHighlight(pasted.id)),
            vec![(8, 9)]
        );

        session.remove_transient_highlight(pasted.id);
        assert!(session.buffer.tags().is_empty());
    }

    #[test]
    fn test_paste_image_at_line_start_and_before_text() {
        let mut session = EditSession::with_text("   tail");
        session.set_caret(3);
        let pasted = session.paste_image(image(4, 4), false).unwrap();
        // Only whitespace before the caret: no leading newline
        assert_eq!(pasted.offset, 3);
        assert_eq!(session.buffer.text(), "   \u{FFFC}tail\n");
        assert_eq!(session.caret(), session.buffer.len_chars());
        assert!(!pasted.highlighted);
    }

    #[test]
    fn test_change_font_size_replace_policy() {
        let mut session = EditSession::with_text("sized");
        session.select(0, 5);
        session.change_font_size(18);
        session.change_font_size(14);
        assert!(session.buffer.ranges_of(&Tag::Size(18)).is_empty());
        assert_eq!(session.buffer.ranges_of(&Tag::Size(14)), vec![(0, 5)]);
        assert_eq!(session.formatting.size, 14);
    }

    #[test]
    fn test_change_font_size_accumulate_policy() {
        let mut session = EditSession::with_text("sized");
        session.policy = FormattingPolicy::Accumulate;
        session.select(0, 5);
        session.change_font_size(18);
        session.change_font_size(14);
        assert_eq!(session.buffer.ranges_of(&Tag::Size(18)), vec![(0, 5)]);
        session.set_caret(2);
        assert_eq!(session.formatting.size, 14);
    }

    #[test]
    fn test_change_color_without_selection_sets_pending() {
        let mut session = EditSession::new();
        let red = Rgb::new(255, 0, 0);
        session.change_text_color(red);
        session.change_highlight_color(red);
        assert!(session.buffer.tags().is_empty());
        session.type_character('r').unwrap();
        assert_eq!(
            session.buffer.tag_names_at(0),
            vec![Tag::Color(red), Tag::Highlight(red)]
        );
    }

    #[test]
    fn test_set_caret_refreshes_formatting() {
        let mut session = EditSession::with_text("ab");
        session.buffer.add_tag(Tag::Bold, 0, 1);
        session.buffer.add_tag(Tag::Size(20), 0, 1);
        session.set_caret(0);
        assert!(session.formatting.bold);
        assert_eq!(session.formatting.size, 20);
        session.set_caret(1);
        assert!(!session.formatting.bold);
        // Size sticks until another size tag is found
        assert_eq!(session.formatting.size, 20);
        assert_ne!(session.formatting.size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_load_text_keeps_configured_size() {
        let mut session = EditSession::with_text("old");
        session.set_default_size(16);
        session.formatting.bold = true;
        session.formatting.size = 30;

        session.load_text("new");

        assert_eq!(session.default_size(), 16);
        assert_eq!(session.formatting, FormattingState::with_size(16));
        session.type_character('x').unwrap();
        assert_eq!(session.buffer.tag_names_at(0), vec![Tag::Size(16)]);
    }

    #[test]
    fn test_cut_and_copy() {
        let mut session = EditSession::with_text("cut me");
        assert_eq!(session.copy(), None);
        session.select(4, 6);
        assert_eq!(session.copy().as_deref(), Some("me"));
        assert_eq!(session.cut().unwrap().as_deref(), Some("me"));
        assert_eq!(session.buffer.text(), "cut ");
        assert_eq!(session.cut().unwrap(), None);
    }

    #[test]
    fn test_cursor_status() {
        let mut session = EditSession::with_text("one\ntwo\n");
        session.set_caret(5);
        assert_eq!(session.cursor_status(), "Line 2, Column 2 | Total Lines: 3");
    }

    #[test]
    fn test_insert_newline_has_no_stamp() {
        let mut session = EditSession::with_text("ab");
        session.set_caret(1);
        session.formatting.bold = true;
        session.insert_newline().unwrap();
        assert_eq!(session.buffer.text(), "a\nb");
        assert!(session.buffer.tags().is_empty());
    }
}
