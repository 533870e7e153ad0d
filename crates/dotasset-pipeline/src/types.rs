//! Shared types for the dotasset detection pipeline.

use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// A detected dot: blob centroid and area-equivalent radius, in pixels.
///
/// All three fields are rounded to 3 decimal places at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    /// Horizontal centroid (pixels from left edge).
    pub x: f64,
    /// Vertical centroid (pixels from top edge).
    pub y: f64,
    /// Radius of the circle whose area equals the blob's pixel count.
    pub radius: f64,
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Detection parameters.
///
/// Deserializing a partial object fills the missing fields from
/// [`Default`], so `{"threshold": 128}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Brightness cut-off. A pixel is foreground when its (possibly
    /// inverted) intensity is at or above this value.
    pub threshold: u8,

    /// Smallest blob pixel count kept (inclusive).
    pub min_area: u64,

    /// Largest blob pixel count kept (inclusive).
    pub max_area: u64,

    /// Detect dark regions on a light background by complementing every
    /// sample before thresholding.
    pub invert: bool,
}

impl DetectConfig {
    /// Default brightness threshold.
    pub const DEFAULT_THRESHOLD: u8 = 200;
    /// Default minimum blob area in pixels.
    pub const DEFAULT_MIN_AREA: u64 = 10;
    /// Default maximum blob area in pixels.
    pub const DEFAULT_MAX_AREA: u64 = 5000;

    /// Whether no blob area can satisfy both bounds.
    ///
    /// Such a config is still valid; it simply keeps nothing.
    #[must_use]
    pub const fn area_range_is_empty(&self) -> bool {
        self.min_area > self.max_area
    }
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            min_area: Self::DEFAULT_MIN_AREA,
            max_area: Self::DEFAULT_MAX_AREA,
            invert: false,
        }
    }
}

/// Component counts gathered while filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectStats {
    /// Connected components found in the binary mask.
    pub components: usize,
    /// Components rejected for having fewer than `min_area` pixels.
    pub too_small: usize,
    /// Components rejected for having more than `max_area` pixels.
    pub too_large: usize,
}

/// Result of running the detection pipeline on one image.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectResult {
    /// Detected dots in label order (not yet sorted for output).
    pub dots: Vec<Dot>,

    /// Dimensions of the decoded image. Recorded in the asset header.
    pub dimensions: Dimensions,

    /// Backend that labeled the components.
    pub backend: BackendKind,

    /// Filtering statistics.
    pub stats: DetectStats,
}

/// Errors that can occur during detection.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// No detection backend was compiled in.
    #[error("no blob detection backend available; {hint}")]
    MissingBackend {
        /// Remediation instructions.
        hint: &'static str,
    },
}
