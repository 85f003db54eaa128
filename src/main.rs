//! Release Verifier - Main entry point
//!
//! Post-step verification gate for the data-release pipeline.

use anyhow::Result;
use clap::Parser;
use release_verifier::manifest::store::ManifestStore;
use release_verifier::storage::S3HttpStore;
use release_verifier::utils;
use release_verifier::verify::tolerance::Tolerance;
use release_verifier::verify::{StepVerifier, Verifier};
use release_verifier::Config;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The folder to where the step's results are written
    #[arg(short, long)]
    output: PathBuf,

    /// The most recent release version
    #[arg(short, long)]
    release_number: u32,

    /// Name of the pipeline step to verify
    #[arg(short, long)]
    step: String,

    /// The percentage drop allowed before a file is flagged
    #[arg(short = 'd', long, default_value_t = 10)]
    size_drop_tolerance: u32,

    /// Release archive bucket (overrides config)
    #[arg(short, long)]
    bucket: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let config = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    // Initialize logging
    let log_level = args.log_level.as_deref().unwrap_or(&config.log.level);
    utils::logger::init(log_level)?;

    tracing::info!(
        "Starting release-verifier v{} (step: {})",
        env!("CARGO_PKG_VERSION"),
        args.step
    );

    // Tolerance is validated before any I/O happens
    let tolerance = Tolerance::new(args.size_drop_tolerance)?;

    let bucket = args.bucket.unwrap_or(config.storage.bucket.clone());
    let manifests = ManifestStore::new(
        Box::new(S3HttpStore::new(&config.storage)),
        bucket,
        config.manifest.file_name.clone(),
        std::env::current_dir()?,
    );

    let mut verifier = StepVerifier::new(
        args.step,
        args.output,
        args.release_number,
        tolerance,
        manifests,
    )?;

    Ok(verifier.run()?)
}
