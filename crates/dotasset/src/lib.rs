//! dotasset: convert an image of dots into a TypeScript asset file.
//!
//! The binary is a thin wrapper around [`run`]: it resolves arguments
//! with [`args::Cli`], then reads the image, runs
//! [`dotasset_pipeline::process`], renders with
//! [`dotasset_export::to_typescript`] and writes the result into the
//! assets directory.

pub mod args;

use std::io::Write;
use std::path::{Path, PathBuf};

use dotasset_export::AssetMetadata;
use dotasset_pipeline::{BackendKind, Dimensions, PipelineError};

pub use args::{Cli, Invocation};

/// `chrono` format for the `// Generated:` header line (ISO 8601,
/// local time, microseconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Errors that abort a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input image could not be read.
    #[error("could not read image {}: {source}", path.display())]
    Read {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Detection failed (bad image data or missing backend).
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The asset file could not be written.
    #[error("could not write {}: {source}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Path of the written asset.
    pub output_path: PathBuf,
    /// Number of dots exported.
    pub dot_count: usize,
    /// Exported identifier.
    pub identifier: String,
    /// Decoded image size.
    pub dimensions: Dimensions,
}

/// Directory generated assets are written to: `src/assets` under the
/// workspace root this tool is built from.
#[must_use]
pub fn default_assets_dir() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .join("src")
        .join("assets")
}

/// Current local time formatted with [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Progress line announcing a fallback, or `None` when `backend` is
/// the preferred one.
#[must_use]
pub fn fallback_notice(backend: BackendKind) -> Option<String> {
    let preferred = BackendKind::PREFERENCE[0];
    (backend != preferred).then(|| format!("{preferred} backend not available, using {backend}"))
}

/// Remediation printed when the build has no detection backend.
#[must_use]
pub fn missing_backend_help(hint: &str) -> String {
    format!(
        "Error: this build has no blob detection backend.\n\
         Install with: cargo install --path crates/dotasset --features exterior\n\
         \x20         OR: cargo install --path crates/dotasset --features labeling\n\
         ({hint})"
    )
}

/// Convert one image and write `<assets_dir>/<name>Dots.ts`.
///
/// Progress lines go to `progress`; failures writing them are ignored.
/// The assets directory is created if missing and an existing asset is
/// overwritten.
///
/// # Errors
///
/// Returns [`CliError::Read`] if the image cannot be read,
/// [`CliError::Pipeline`] if detection fails, and [`CliError::Write`] if
/// the asset cannot be written. Nothing is written on error.
pub fn run(
    invocation: &Invocation,
    assets_dir: &Path,
    timestamp: &str,
    progress: &mut impl Write,
) -> Result<Summary, CliError> {
    let Invocation {
        input,
        output_name,
        config,
    } = invocation;

    let _ = writeln!(progress, "Processing: {}", input.display());
    let _ = writeln!(progress, "Output name: {output_name}");
    let _ = writeln!(
        progress,
        "Threshold: {}, Min area: {}, Max area: {}",
        config.threshold, config.min_area, config.max_area,
    );

    let image_bytes = std::fs::read(input).map_err(|source| CliError::Read {
        path: input.clone(),
        source,
    })?;

    let result = dotasset_pipeline::process(&image_bytes, config)?;
    tracing::debug!(backend = %result.backend, stats = ?result.stats, "detection finished");
    if let Some(notice) = fallback_notice(result.backend) {
        let _ = writeln!(progress, "{notice}");
    }

    let Dimensions { width, height } = result.dimensions;
    let _ = writeln!(progress, "Image size: {width} x {height}");
    let _ = writeln!(progress, "Found {} dots", result.dots.len());

    let source_name = input
        .file_name()
        .map_or_else(|| input.to_string_lossy(), |n| n.to_string_lossy());
    let metadata = AssetMetadata {
        source_name: &source_name,
        dimensions: result.dimensions,
        timestamp,
    };
    let contents = dotasset_export::to_typescript(&result.dots, output_name, &metadata);

    let output_path = assets_dir.join(dotasset_export::file_name(output_name));
    write_asset(assets_dir, &output_path, &contents)?;

    let summary = Summary {
        output_path,
        dot_count: result.dots.len(),
        identifier: dotasset_export::identifier(output_name),
        dimensions: result.dimensions,
    };
    print_completion(progress, &summary, output_name);
    Ok(summary)
}

fn write_asset(assets_dir: &Path, output_path: &Path, contents: &str) -> Result<(), CliError> {
    let to_error = |source| CliError::Write {
        path: output_path.to_path_buf(),
        source,
    };
    std::fs::create_dir_all(assets_dir).map_err(to_error)?;
    std::fs::write(output_path, contents).map_err(to_error)
}

fn print_completion(progress: &mut impl Write, summary: &Summary, output_name: &str) {
    let _ = writeln!(progress);
    let _ = writeln!(progress, "Generated: {}", summary.output_path.display());
    let _ = writeln!(progress, "   {} dots exported", summary.dot_count);
    let _ = writeln!(progress);
    let _ = writeln!(progress, "To use this asset:");
    let _ = writeln!(progress, "1. Import in targets.ts:");
    let _ = writeln!(
        progress,
        "   import {{ {} }} from \"{}\";",
        summary.identifier,
        dotasset_export::import_path(output_name),
    );
    let _ = writeln!(progress, "2. Create a sampler function similar to existing ones");
    let _ = writeln!(progress, "3. Add scene config in config.ts");
}
