//! System clipboard access
//!
//! Paste prefers an image over text, the way screenshots usually land on the
//! clipboard alongside a text fallback. Copy and cut only ever write text.

use crate::error::EditorError;
use crate::image::EmbeddedImage;

/// What a paste found on the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    Image(EmbeddedImage),
    Text(String),
    Empty,
}

/// Read the clipboard, preferring an image. Images are fitted to `max`.
///
/// An unavailable clipboard reads as [`ClipboardContent::Empty`].
pub fn read(max: (u32, u32)) -> ClipboardContent {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            tracing::warn!("Clipboard unavailable: {}", e);
            return ClipboardContent::Empty;
        }
    };

    if let Ok(data) = clipboard.get_image() {
        match EmbeddedImage::from_rgba(
            data.width as u32,
            data.height as u32,
            data.bytes.into_owned(),
            max,
        ) {
            Ok(image) => return ClipboardContent::Image(image),
            Err(e) => tracing::debug!("Ignoring clipboard image: {}", e),
        }
    }

    match clipboard.get_text() {
        Ok(text) if !text.is_empty() => ClipboardContent::Text(text),
        _ => ClipboardContent::Empty,
    }
}

/// Put text on the clipboard
pub fn write_text(text: &str) -> Result<(), EditorError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| EditorError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| EditorError::Clipboard(e.to_string()))
}
