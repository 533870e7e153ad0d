//! Binary thresholding.

use image::{GrayImage, Luma};

/// Mask value for foreground pixels.
pub const FOREGROUND: u8 = 255;
/// Mask value for background pixels.
pub const BACKGROUND: u8 = 0;

/// Produce a binary mask: [`FOREGROUND`] where `v >= threshold`,
/// [`BACKGROUND`] elsewhere.
///
/// `imageproc::contrast::threshold` uses a strict `>` comparison, so the
/// mask is built directly to keep pixels at the cut-off.
#[must_use = "returns the binary mask"]
pub fn binary_mask(gray: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] >= threshold {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}
