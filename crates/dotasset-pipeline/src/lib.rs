//! dotasset-pipeline: Pure blob detection pipeline (sans-IO).
//!
//! Converts a raster image of discrete dots into `(x, y, radius)`
//! measurements through:
//! decode -> grayscale -> optional invert -> threshold ->
//! connected-component labeling -> area filter -> centroid/radius.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. Filesystem interaction
//! lives in the `dotasset` binary crate.

pub mod backend;
pub mod grayscale;
pub mod measure;
pub mod threshold;
pub mod types;

pub use backend::{BackendKind, BlobBackend};
pub use measure::sort_reading_order;
pub use types::{
    DetectConfig, DetectResult, DetectStats, Dimensions, Dot, GrayImage, PipelineError,
};

/// Run the full detection pipeline.
///
/// Takes raw image bytes (PNG, JPEG, BMP, WebP) and a configuration,
/// then produces a [`DetectResult`] containing the qualifying dots in
/// label order and the decoded image dimensions.
///
/// # Pipeline steps
///
/// 1. Warn about an empty area range
/// 2. Select the most preferred available backend
/// 3. Decode image and convert to grayscale
/// 4. Optional inversion
/// 5. Threshold, label, measure and filter (see [`detect`])
///
/// # Errors
///
/// Returns [`PipelineError::MissingBackend`] if no backend is compiled in.
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is unrecognized.
pub fn process(image_bytes: &[u8], config: &DetectConfig) -> Result<DetectResult, PipelineError> {
    if config.area_range_is_empty() {
        tracing::warn!(
            min_area = config.min_area,
            max_area = config.max_area,
            "min area exceeds max area; no dots can qualify",
        );
    }

    let backend = BackendKind::select()?;
    tracing::debug!(%backend, "selected blob backend");

    let gray = backend.decode(image_bytes)?;
    let dimensions = Dimensions {
        width: gray.width(),
        height: gray.height(),
    };

    let gray = if config.invert {
        grayscale::invert(&gray)
    } else {
        gray
    };

    let (dots, stats) = detect(&gray, config, backend)?;

    Ok(DetectResult {
        dots,
        dimensions,
        backend,
        stats,
    })
}

/// Detect dots in an already decoded (and, if wanted, inverted) grid.
///
/// `config.invert` is not consulted here; inversion belongs to decoding.
///
/// # Errors
///
/// Returns [`PipelineError::MissingBackend`] if `backend` is not
/// available in this build.
pub fn detect(
    gray: &GrayImage,
    config: &DetectConfig,
    backend: BackendKind,
) -> Result<(Vec<Dot>, DetectStats), PipelineError> {
    let mask = threshold::binary_mask(gray, config.threshold);
    let labels = backend.label(&mask)?;
    let (dots, stats) = measure::measure_components(&labels, config.min_area, config.max_area);

    tracing::debug!(
        components = stats.components,
        too_small = stats.too_small,
        too_large = stats.too_large,
        kept = dots.len(),
        "measured components",
    );

    Ok((dots, stats))
}

#[cfg(all(test, feature = "exterior", feature = "labeling"))]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::grayscale::tests::encode_png;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    /// Draw filled disks `(cx, cy, r)` in `fg` over a `bg` canvas.
    fn disks_png(
        width: u32,
        height: u32,
        disks: &[(i64, i64, i64)],
        fg: Rgba<u8>,
        bg: Rgba<u8>,
    ) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let inside = disks.iter().any(|&(cx, cy, r)| {
                let dx = i64::from(x) - cx;
                let dy = i64::from(y) - cy;
                dx * dx + dy * dy <= r * r
            });
            if inside { fg } else { bg }
        });
        encode_png(&img)
    }

    #[test]
    fn process_empty_input() {
        let result = process(&[], &DetectConfig::default());
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn process_corrupt_input() {
        let result = process(&[0xFF, 0x00], &DetectConfig::default());
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn inverted_area_bounds_keep_no_dots() {
        let png = disks_png(60, 60, &[(30, 30, 8)], WHITE, BLACK);
        let config = DetectConfig {
            min_area: 300,
            max_area: 100,
            ..DetectConfig::default()
        };
        let result = process(&png, &config).unwrap();
        assert!(result.dots.is_empty());
        assert_eq!(result.stats.components, 1);
        assert_eq!(result.stats.too_small, 1);
    }

    #[test]
    fn blank_image_yields_no_dots() {
        let png = disks_png(40, 30, &[], WHITE, BLACK);
        let result = process(&png, &DetectConfig::default()).unwrap();
        assert!(result.dots.is_empty());
        assert_eq!(
            result.dimensions,
            Dimensions {
                width: 40,
                height: 30
            }
        );
    }

    #[test]
    fn single_white_disk() {
        let png = disks_png(100, 100, &[(50, 50, 10)], WHITE, BLACK);
        let result = process(&png, &DetectConfig::default()).unwrap();

        assert_eq!(result.dots.len(), 1);
        let dot = result.dots[0];
        assert!((dot.x - 50.0).abs() < 1e-9, "x = {}", dot.x);
        assert!((dot.y - 50.0).abs() < 1e-9, "y = {}", dot.y);
        assert!((dot.radius - 10.0).abs() <= 0.5, "radius = {}", dot.radius);
        assert_eq!(result.backend, BackendKind::Exterior);
    }

    #[test]
    fn inverted_black_disk_matches_white_disk() {
        let white_on_black = disks_png(100, 100, &[(50, 50, 10)], WHITE, BLACK);
        let black_on_white = disks_png(100, 100, &[(50, 50, 10)], BLACK, WHITE);

        let plain = process(&white_on_black, &DetectConfig::default()).unwrap();
        let inverted = process(
            &black_on_white,
            &DetectConfig {
                invert: true,
                ..DetectConfig::default()
            },
        )
        .unwrap();

        assert_eq!(plain.dots, inverted.dots);
    }

    #[test]
    fn max_area_excludes_largest_disk() {
        let png = disks_png(
            220,
            160,
            &[(30, 120, 5), (60, 30, 15), (150, 90, 40)],
            WHITE,
            BLACK,
        );
        let config = DetectConfig {
            max_area: 2000,
            ..DetectConfig::default()
        };
        let mut result = process(&png, &config).unwrap();
        sort_reading_order(&mut result.dots);

        assert_eq!(result.dots.len(), 2);
        assert_eq!(result.stats.too_large, 1);
        assert!((result.dots[0].y - 30.0).abs() < 1e-9);
        assert!((result.dots[1].y - 120.0).abs() < 1e-9);
        assert!(result.dots[0].radius > result.dots[1].radius);
    }

    #[test]
    fn implied_area_stays_within_bounds() {
        let png = disks_png(
            200,
            200,
            &[(20, 20, 2), (60, 60, 6), (120, 120, 12), (170, 40, 20)],
            WHITE,
            BLACK,
        );
        let config = DetectConfig {
            min_area: 20,
            max_area: 600,
            ..DetectConfig::default()
        };
        let result = process(&png, &config).unwrap();
        assert!(!result.dots.is_empty());
        for dot in &result.dots {
            let implied = std::f64::consts::PI * dot.radius * dot.radius;
            assert!(
                (19.9..=600.1).contains(&implied),
                "implied area {implied} out of bounds"
            );
        }
    }

    #[test]
    fn backends_agree_on_well_separated_disks() {
        let png = disks_png(120, 80, &[(20, 20, 6), (90, 50, 9)], WHITE, BLACK);
        let gray = grayscale::decode_and_grayscale(&png).unwrap();
        let config = DetectConfig::default();

        let (mut exterior, _) = detect(&gray, &config, BackendKind::Exterior).unwrap();
        let (mut labeling, _) = detect(&gray, &config, BackendKind::Labeling).unwrap();
        sort_reading_order(&mut exterior);
        sort_reading_order(&mut labeling);

        assert_eq!(exterior, labeling);
    }
}
