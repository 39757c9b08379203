//! Inline images pasted into the document
//!
//! Images are decoded into RGBA pixel buffers and scaled down to fit the
//! paste box, preserving aspect ratio. Each image occupies one character
//! slot in the text buffer.

use ::image::imageops::FilterType;
use ::image::RgbaImage;

use crate::error::EditorError;

/// Largest display box for a pasted image
pub const MAX_IMAGE_WIDTH: u32 = 400;
pub const MAX_IMAGE_HEIGHT: u32 = 300;

/// An image embedded in the text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Buffer-unique identifier (assigned on insert)
    pub id: u64,
    /// Display width in pixels (after downscaling)
    pub width: u32,
    /// Display height in pixels (after downscaling)
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel), `width * height * 4` long
    pub pixels: Vec<u8>,
}

impl EmbeddedImage {
    /// Build an image from raw RGBA data, downscaling it to fit `max`.
    pub fn from_rgba(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        max: (u32, u32),
    ) -> Result<Self, EditorError> {
        let rgba = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            EditorError::Image(format!(
                "pixel buffer does not match {}x{} RGBA",
                width, height
            ))
        })?;

        let (fit_w, fit_h) = fit_within(width, height, max.0, max.1);
        let rgba = if (fit_w, fit_h) != (width, height) {
            tracing::debug!(
                "Downscaling pasted image {}x{} -> {}x{}",
                width,
                height,
                fit_w,
                fit_h
            );
            ::image::imageops::resize(&rgba, fit_w, fit_h, FilterType::Lanczos3)
        } else {
            rgba
        };

        let (width, height) = rgba.dimensions();
        Ok(Self {
            id: 0,
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Decode an encoded image (PNG, JPEG, ...) and fit it to `max`
    pub fn decode(bytes: &[u8], max: (u32, u32)) -> Result<Self, EditorError> {
        let img =
            ::image::load_from_memory(bytes).map_err(|e| EditorError::Image(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw(), max)
    }
}

/// Compute the display size of an image inside a `max_w` x `max_h` box.
///
/// Returns the original size if it already fits; never scales up.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_w == 0 || max_h == 0 {
        return (width, height);
    }
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let scale_x = max_w as f64 / width as f64;
    let scale_y = max_h as f64 / height as f64;
    let scale = scale_x.min(scale_y);
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}
