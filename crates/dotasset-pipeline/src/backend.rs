//! Blob labeling backends.
//!
//! This module defines the [`BlobBackend`] trait for pluggable
//! connected-component strategies and the [`BackendKind`] enum listing
//! them in order of preference.
//!
//! # Capability selection
//!
//! Each backend sits behind a cargo feature (`exterior`, `labeling`).
//! [`BackendKind::select`] picks the first compiled-in backend, so a
//! build without the primary strategy falls back to the secondary one
//! with no change at the call site. A build with neither reports
//! [`PipelineError::MissingBackend`].

use std::fmt;

use image::{GrayImage, ImageBuffer, Luma};
#[cfg(any(feature = "exterior", feature = "labeling"))]
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::grayscale;
#[cfg(any(feature = "exterior", feature = "labeling"))]
use crate::threshold::BACKGROUND;
#[cfg(feature = "exterior")]
use crate::threshold::FOREGROUND;
use crate::types::PipelineError;

/// Per-pixel component labels. `0` is background; components are
/// numbered from `1`.
pub type LabelMap = ImageBuffer<Luma<u32>, Vec<u32>>;

/// Remediation shown when no backend was compiled in.
pub const MISSING_BACKEND_HINT: &str = "rebuild with `--features exterior` \
     (preferred) or `--features labeling`";

/// Selects which connected-component strategy labels the binary mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// 8-connected components with exterior-contour semantics.
    ///
    /// Holes are filled before labeling: background is labeled
    /// 4-connected (the dual of 8-connected foreground) and every
    /// background region that does not touch the image border becomes
    /// foreground. A ring therefore yields one solid blob, and blobs
    /// nested inside a hole merge into their enclosing blob.
    Exterior,

    /// Direct 4-connected labeling of the mask. Holes stay holes and
    /// diagonal-only neighbours are separate blobs.
    Labeling,
}

impl BackendKind {
    /// All backends, most preferred first.
    pub const PREFERENCE: [Self; 2] = [Self::Exterior, Self::Labeling];

    /// Pick the most preferred backend compiled into this build.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingBackend`] if no backend feature is
    /// enabled.
    pub fn select() -> Result<Self, PipelineError> {
        Self::select_from(|kind| kind.is_available())
    }

    /// Pick the most preferred backend for which `available` holds.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingBackend`] if `available` rejects
    /// every backend.
    pub fn select_from(available: impl Fn(Self) -> bool) -> Result<Self, PipelineError> {
        Self::PREFERENCE
            .into_iter()
            .find(|&kind| available(kind))
            .ok_or(PipelineError::MissingBackend {
                hint: MISSING_BACKEND_HINT,
            })
    }

    /// Short lowercase name, matching the cargo feature.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exterior => "exterior",
            Self::Labeling => "labeling",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability interface for detection backends.
///
/// Input to [`label`](Self::label): a binary mask (255 = foreground,
/// 0 = background). Output: a label map of the same dimensions.
pub trait BlobBackend {
    /// Whether this backend was compiled into the current build.
    fn is_available(&self) -> bool;

    /// Decode raw image bytes into a grayscale grid.
    ///
    /// Both shipped backends share the `image` crate decoder.
    ///
    /// # Errors
    ///
    /// See [`grayscale::decode_and_grayscale`].
    fn decode(&self, bytes: &[u8]) -> Result<GrayImage, PipelineError> {
        grayscale::decode_and_grayscale(bytes)
    }

    /// Label the connected foreground components of `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingBackend`] if the backend is not
    /// available in this build.
    fn label(&self, mask: &GrayImage) -> Result<LabelMap, PipelineError>;
}

impl BlobBackend for BackendKind {
    fn is_available(&self) -> bool {
        match *self {
            Self::Exterior => cfg!(feature = "exterior"),
            Self::Labeling => cfg!(feature = "labeling"),
        }
    }

    fn label(&self, mask: &GrayImage) -> Result<LabelMap, PipelineError> {
        match *self {
            #[cfg(feature = "exterior")]
            Self::Exterior => Ok(label_exterior(mask)),
            #[cfg(feature = "labeling")]
            Self::Labeling => Ok(label_four_connected(mask)),
            #[allow(unreachable_patterns)]
            _ => {
                let _ = mask;
                Err(PipelineError::MissingBackend {
                    hint: MISSING_BACKEND_HINT,
                })
            }
        }
    }
}

#[cfg(feature = "exterior")]
fn label_exterior(mask: &GrayImage) -> LabelMap {
    let filled = fill_holes(mask);
    connected_components(&filled, Connectivity::Eight, Luma([BACKGROUND]))
}

#[cfg(feature = "labeling")]
fn label_four_connected(mask: &GrayImage) -> LabelMap {
    connected_components(mask, Connectivity::Four, Luma([BACKGROUND]))
}

/// Turn every background region enclosed by foreground into foreground.
#[cfg(feature = "exterior")]
fn fill_holes(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();

    // Label the background; foreground pixels get label 0 here.
    let regions = connected_components(mask, Connectivity::Four, Luma([FOREGROUND]));

    let max_label = regions.pixels().map(|p| p.0[0]).max().unwrap_or(0);
    let mut outside = vec![false; max_label as usize + 1];
    for (x, y, p) in regions.enumerate_pixels() {
        if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
            outside[p.0[0] as usize] = true;
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        let label = regions.get_pixel(x, y).0[0];
        if label != 0 && outside[label as usize] {
            Luma([BACKGROUND])
        } else {
            Luma([FOREGROUND])
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod selection_tests {
    use super::*;

    #[test]
    fn primary_is_used_when_available() {
        let kind = BackendKind::select_from(|_| true).unwrap();
        assert_eq!(kind, BackendKind::Exterior);
    }

    #[test]
    fn falls_back_to_secondary_without_primary() {
        let kind = BackendKind::select_from(|k| k == BackendKind::Labeling).unwrap();
        assert_eq!(kind, BackendKind::Labeling);
    }

    #[test]
    fn no_backend_reports_missing_dependency() {
        let err = BackendKind::select_from(|_| false).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingBackend { hint } if hint == MISSING_BACKEND_HINT
        ));
        let message = err.to_string();
        assert!(message.contains("--features exterior"), "{message}");
        assert!(message.contains("--features labeling"), "{message}");
    }

    #[test]
    fn select_matches_compiled_features() {
        let expected = if cfg!(feature = "exterior") {
            Some(BackendKind::Exterior)
        } else if cfg!(feature = "labeling") {
            Some(BackendKind::Labeling)
        } else {
            None
        };
        assert_eq!(BackendKind::select().ok(), expected);
    }
}
