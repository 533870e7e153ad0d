//! dotasset: convert an image of dots into a TypeScript asset file.
//!
//! # Usage
//!
//! ```text
//! dotasset <INPUT_IMAGE> <OUTPUT_NAME> [--threshold N] [--min-area N] [--max-area N] [--invert]
//! ```
//!
//! Set `RUST_LOG=debug` for backend and filtering diagnostics on stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use dotasset::{Cli, CliError};
use dotasset_pipeline::PipelineError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::parse_permissive(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let Some(invocation) = cli.invocation() else {
        // Missing positionals is a request for help, not a failure.
        println!("{}", Cli::long_help());
        return ExitCode::SUCCESS;
    };

    let mut stdout = std::io::stdout().lock();
    let assets_dir = dotasset::default_assets_dir();
    match dotasset::run(&invocation, &assets_dir, &dotasset::timestamp_now(), &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(CliError::Pipeline(PipelineError::MissingBackend { hint })) => {
            eprintln!("{}", dotasset::missing_backend_help(hint));
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
