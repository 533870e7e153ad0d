//! TypeScript asset serializer.
//!
//! Renders a dot collection as a single exported constant:
//!
//! ```text
//! // Auto-generated dot asset
//! // Source image: dots.png
//! // Source image resolution: 640 x 480
//! // Generated: 2026-02-14T12:30:45.123456
//!
//! export const WHEELCHAIR_DOTS_SOURCE: Array<[number, number, number]> = [
//!   [12.000, 4.500, 3.568],
//! ];
//! ```
//!
//! Downstream rendering code imports these files, so their exact text
//! must stay stable.
//!
//! This is a pure function with no I/O: it returns a `String`. The
//! caller supplies the timestamp so output is reproducible under test.

use std::fmt::Write;

use dotasset_pipeline::{Dimensions, Dot, sort_reading_order};

/// Suffix appended to the uppercased output name to form the identifier.
pub const IDENTIFIER_SUFFIX: &str = "_DOTS_SOURCE";

/// Suffix appended to the output name to form the module name.
pub const MODULE_SUFFIX: &str = "Dots";

/// File extension of generated assets.
pub const EXTENSION: &str = "ts";

/// Metadata embedded as `//` comment lines above the array.
#[derive(Debug, Clone, Copy)]
pub struct AssetMetadata<'a> {
    /// Base file name of the source image (`// Source image: <name>`).
    pub source_name: &'a str,

    /// Decoded image size (`// Source image resolution: <w> x <h>`).
    pub dimensions: Dimensions,

    /// Generation time (`// Generated: <timestamp>`).
    pub timestamp: &'a str,
}

/// Exported identifier for `output_name`, e.g. `wheelchair` ->
/// `WHEELCHAIR_DOTS_SOURCE`.
#[must_use]
pub fn identifier(output_name: &str) -> String {
    format!("{}{IDENTIFIER_SUFFIX}", output_name.to_uppercase())
}

/// Module name for `output_name`, e.g. `wheelchair` -> `wheelchairDots`.
#[must_use]
pub fn module_name(output_name: &str) -> String {
    format!("{output_name}{MODULE_SUFFIX}")
}

/// File name for `output_name`, e.g. `wheelchair` -> `wheelchairDots.ts`.
#[must_use]
pub fn file_name(output_name: &str) -> String {
    format!("{}.{EXTENSION}", module_name(output_name))
}

/// Import specifier used from a sibling source directory,
/// e.g. `../assets/wheelchairDots`.
#[must_use]
pub fn import_path(output_name: &str) -> String {
    format!("../assets/{}", module_name(output_name))
}

/// Serialize dots into a TypeScript module string.
///
/// Dots are emitted in reading order (see [`sort_reading_order`]);
/// the input slice is left untouched. Every number is printed with
/// exactly 3 fractional digits.
///
/// # Examples
///
/// ```
/// use dotasset_pipeline::{Dimensions, Dot};
/// use dotasset_export::{AssetMetadata, to_typescript};
///
/// let dots = [Dot { x: 1.0, y: 2.5, radius: 3.25 }];
/// let metadata = AssetMetadata {
///     source_name: "demo.png",
///     dimensions: Dimensions { width: 8, height: 8 },
///     timestamp: "2026-01-01T00:00:00.000000",
/// };
/// let ts = to_typescript(&dots, "demo", &metadata);
/// assert!(ts.contains("export const DEMO_DOTS_SOURCE"));
/// assert!(ts.contains("  [1.000, 2.500, 3.250],\n"));
/// ```
#[must_use]
pub fn to_typescript(dots: &[Dot], output_name: &str, metadata: &AssetMetadata<'_>) -> String {
    let mut sorted = dots.to_vec();
    sort_reading_order(&mut sorted);

    let mut out = String::new();

    // --- Header ---
    let Dimensions { width, height } = metadata.dimensions;
    let _ = writeln!(out, "// Auto-generated dot asset");
    let _ = writeln!(out, "// Source image: {}", metadata.source_name);
    let _ = writeln!(out, "// Source image resolution: {width} x {height}");
    let _ = writeln!(out, "// Generated: {}", metadata.timestamp);
    out.push('\n');

    // --- Array literal ---
    let _ = writeln!(
        out,
        "export const {}: Array<[number, number, number]> = [",
        identifier(output_name),
    );
    for dot in &sorted {
        let _ = writeln!(out, "  [{:.3}, {:.3}, {:.3}],", dot.x, dot.y, dot.radius);
    }
    out.push_str("];\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn dot(x: f64, y: f64, radius: f64) -> Dot {
        Dot { x, y, radius }
    }

    fn metadata() -> AssetMetadata<'static> {
        AssetMetadata {
            source_name: "wheelchair.png",
            dimensions: Dimensions {
                width: 640,
                height: 480,
            },
            timestamp: "2026-02-14T12:30:45.000000",
        }
    }

    #[test]
    fn identifier_uppercases_and_suffixes() {
        assert_eq!(identifier("wheelchair"), "WHEELCHAIR_DOTS_SOURCE");
        assert_eq!(identifier("myNewScene"), "MYNEWSCENE_DOTS_SOURCE");
    }

    #[test]
    fn file_and_import_names() {
        assert_eq!(file_name("wheelchair"), "wheelchairDots.ts");
        assert_eq!(import_path("wheelchair"), "../assets/wheelchairDots");
    }

    #[test]
    fn full_output_shape() {
        let dots = [dot(10.0, 20.0, 3.0), dot(1.5, 2.25, 0.5)];
        let ts = to_typescript(&dots, "wheelchair", &metadata());
        let expected = "\
// Auto-generated dot asset
// Source image: wheelchair.png
// Source image resolution: 640 x 480
// Generated: 2026-02-14T12:30:45.000000

export const WHEELCHAIR_DOTS_SOURCE: Array<[number, number, number]> = [
  [1.500, 2.250, 0.500],
  [10.000, 20.000, 3.000],
];
";
        assert_eq!(ts, expected);
    }

    #[test]
    fn empty_collection_still_has_header_and_array() {
        let ts = to_typescript(&[], "empty", &metadata());
        assert!(ts.starts_with("// Auto-generated dot asset\n"));
        assert!(ts.ends_with(
            "export const EMPTY_DOTS_SOURCE: Array<[number, number, number]> = [\n];\n"
        ));
    }

    #[test]
    fn rows_follow_reading_order() {
        let dots = [dot(9.0, 5.0, 1.0), dot(2.0, 5.0, 1.0), dot(7.0, 1.0, 1.0)];
        let ts = to_typescript(&dots, "order", &metadata());
        let rows: Vec<&str> = ts.lines().filter(|l| l.starts_with("  [")).collect();
        assert_eq!(
            rows,
            vec![
                "  [7.000, 1.000, 1.000],",
                "  [2.000, 5.000, 1.000],",
                "  [9.000, 5.000, 1.000],",
            ]
        );
    }

    #[test]
    fn input_slice_is_not_reordered() {
        let dots = [dot(0.0, 9.0, 1.0), dot(0.0, 1.0, 1.0)];
        let _ = to_typescript(&dots, "keep", &metadata());
        assert!((dots[0].y - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn numbers_always_have_three_decimals() {
        let ts = to_typescript(&[dot(0.1, 123.456, 7.0)], "fmt", &metadata());
        assert!(ts.contains("  [0.100, 123.456, 7.000],\n"));
    }
}
