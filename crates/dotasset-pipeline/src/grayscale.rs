//! Image decoding, grayscale conversion and polarity inversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces a
//! single-channel intensity grid. This is the first step in the
//! pipeline: raw bytes in, `GrayImage` out.

use image::{GrayImage, Luma};

use crate::types::PipelineError;

/// Decode raw image bytes and convert to grayscale.
///
/// Supports whatever the `image` crate was built to decode. The standard
/// luminance formula is used for RGB-to-gray conversion:
/// `0.299*R + 0.587*G + 0.114*B`. Alpha is discarded.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
#[must_use = "returns the decoded grayscale image"]
pub fn decode_and_grayscale(bytes: &[u8]) -> Result<GrayImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_luma8())
}

/// Complement every sample (`255 - v`), swapping foreground and
/// background polarity.
#[must_use = "returns the inverted image"]
pub fn invert(gray: &GrayImage) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([u8::MAX - gray.get_pixel(x, y).0[0]])
    })
}
