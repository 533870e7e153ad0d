//! Command-line argument model.
//!
//! Parsing happens in two passes. [`retain_recognized`] first drops every
//! token the tool does not understand, so newer callers can pass flags
//! this build ignores. The surviving tokens then go
//! through `clap`, which types and range-checks the values and fails
//! fast on malformed ones.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use dotasset_pipeline::DetectConfig;

/// Options that take a value.
const VALUE_OPTIONS: [&str; 3] = ["--threshold", "--min-area", "--max-area"];

/// Options that stand alone.
const FLAG_OPTIONS: [&str; 5] = ["--invert", "--help", "-h", "--version", "-V"];

/// Number of positional arguments the tool consumes.
const POSITIONALS: usize = 2;

const AFTER_LONG_HELP: &str = "\
Examples:
  dotasset ./my-dots.png myNewScene
  dotasset ./design.png wheelchair --threshold 128
  dotasset ./dark-dots.png wheelchair --invert --max-area 800

This writes src/assets/<output-name>Dots.ts, replacing any existing file.
Unrecognized options are ignored.";

/// Convert an image with dots into a TypeScript asset file.
///
/// Detects blob-shaped regions brighter than the threshold, measures each
/// blob's centroid and area-equivalent radius, and writes them as an
/// exported `Array<[number, number, number]>` sorted top-to-bottom, then
/// left-to-right.
#[derive(Debug, Parser)]
#[command(name = "dotasset", version, after_long_help = AFTER_LONG_HELP)]
pub struct Cli {
    /// Path to a PNG/JPEG/BMP/WebP image with a dot pattern.
    #[arg(value_name = "INPUT_IMAGE")]
    pub input: Option<PathBuf>,

    /// Name for the generated asset (e.g. "wheelchair" -> wheelchairDots.ts).
    #[arg(value_name = "OUTPUT_NAME")]
    pub output_name: Option<String>,

    /// Brightness threshold; pixels at or above it are dot pixels.
    #[arg(long, value_name = "0-255", default_value_t = DetectConfig::DEFAULT_THRESHOLD)]
    pub threshold: u8,

    /// Minimum dot area in pixels (inclusive).
    #[arg(long, value_name = "PX", default_value_t = DetectConfig::DEFAULT_MIN_AREA)]
    pub min_area: u64,

    /// Maximum dot area in pixels (inclusive).
    #[arg(long, value_name = "PX", default_value_t = DetectConfig::DEFAULT_MAX_AREA)]
    pub max_area: u64,

    /// Detect dark dots on a light background.
    #[arg(long)]
    pub invert: bool,
}

/// A fully resolved conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Source image path.
    pub input: PathBuf,
    /// Asset name used for the identifier and file name.
    pub output_name: String,
    /// Detection parameters.
    pub config: DetectConfig,
}

impl Cli {
    /// Parse raw process arguments (including the program name),
    /// ignoring anything unrecognized.
    ///
    /// # Errors
    ///
    /// Returns the `clap` error for malformed option values, and for
    /// `--help`/`--version` (whose `exit` prints and exits with 0).
    pub fn parse_permissive<I>(raw: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::try_parse_from(retain_recognized(raw))
    }

    /// The resolved request, or `None` if a positional is missing.
    #[must_use]
    pub fn invocation(&self) -> Option<Invocation> {
        Some(Invocation {
            input: self.input.clone()?,
            output_name: self.output_name.clone()?,
            config: DetectConfig {
                threshold: self.threshold,
                min_area: self.min_area,
                max_area: self.max_area,
                invert: self.invert,
            },
        })
    }

    /// Full usage text, as printed when positionals are missing.
    #[must_use]
    pub fn long_help() -> String {
        Self::command().render_long_help().to_string()
    }
}

/// Keep only the tokens the tool understands.
///
/// The first token is the program name and is always kept. Positionals
/// are moved behind a `--` separator so a file named like an option
/// cannot be misread.
pub fn retain_recognized<I>(raw: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut tokens = raw.into_iter();
    let mut options: Vec<OsString> = tokens.next().into_iter().collect();
    let mut positionals = Vec::with_capacity(POSITIONALS);

    while let Some(token) = tokens.next() {
        let Some(text) = token.to_str() else {
            keep_positional(&mut positionals, token);
            continue;
        };

        if VALUE_OPTIONS.contains(&text) {
            match tokens.next() {
                Some(value) => {
                    options.push(token);
                    options.push(value);
                }
                None => tracing::debug!(option = text, "ignoring option without a value"),
            }
        } else if FLAG_OPTIONS.contains(&text) || is_inline_value_option(text) {
            options.push(token);
        } else if text.starts_with('-') && text != "-" {
            tracing::debug!(option = text, "ignoring unrecognized option");
        } else {
            keep_positional(&mut positionals, token);
        }
    }

    options.push(OsString::from("--"));
    options.extend(positionals);
    options
}

/// `--threshold=128` style tokens.
fn is_inline_value_option(text: &str) -> bool {
    text.split_once('=')
        .is_some_and(|(name, _)| VALUE_OPTIONS.contains(&name))
}

fn keep_positional(positionals: &mut Vec<OsString>, token: OsString) {
    if positionals.len() < POSITIONALS {
        positionals.push(token);
    } else {
        tracing::debug!(argument = ?token, "ignoring surplus positional argument");
    }
}
