//! Edge Model Code Generator
//!
//! Drives the pipeline end to end: read a job, segment the recording, score
//! each window host-side, generate the embedded sources and write them out.

mod job;
mod output;
mod settings;

pub use job::Job;
pub use output::{write_artifacts, MANIFEST_FILE};
pub use settings::{Settings, ENV_PREFIX};

use anyhow::{bail, Context, Result};
use codegen::{emit, GeneratedArtifacts, PlatformConfig};
use feature_engine::extract_all;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use window_segmenter::segment;

const USAGE: &str = "Usage: edge-codegen --input <job.json> [--config <settings.toml>] [--output <dir>]";

/// Parsed command-line arguments
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Optional settings file
    pub config: Option<PathBuf>,
    /// Job JSON file
    pub input: PathBuf,
    /// Output directory
    pub output: PathBuf,
}

/// Outcome of one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Windows produced by segmentation
    pub windows: usize,
    /// Windows whose host-side score exceeds the threshold
    pub flagged: usize,
    /// Paths written
    pub files_written: Vec<PathBuf>,
    /// Generated text and metadata
    pub artifacts: GeneratedArtifacts,
}

/// Parse arguments (program name already skipped)
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs> {
    let mut config = None;
    let mut input = None;
    let mut output = PathBuf::from("generated");

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => config = Some(PathBuf::from(next_value(&mut args, &arg)?)),
            "--input" | "-i" => input = Some(PathBuf::from(next_value(&mut args, &arg)?)),
            "--output" | "-o" => output = PathBuf::from(next_value(&mut args, &arg)?),
            "--help" | "-h" => bail!(USAGE),
            other => bail!("Unknown argument '{}'\n{}", other, USAGE),
        }
    }

    let input = input.with_context(|| format!("Missing --input\n{}", USAGE))?;
    Ok(CliArgs {
        config,
        input,
        output,
    })
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{} expects a value\n{}", flag, USAGE))
}

/// Initialize logging
pub fn init_logging(level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the full pipeline for one job
pub fn run(settings: &Settings, args: &CliArgs) -> Result<RunSummary> {
    let job = Job::from_path(&args.input)?;
    info!(
        "Loaded job: {} rows, {} channels, {} features, {} model",
        job.table.len(),
        job.channels.len(),
        job.features.len(),
        job.model.kind()
    );

    let platform = PlatformConfig {
        platform: settings.platform,
        window_size: settings.segment.window_size,
        sampling_rate_hz: settings.segment.sampling_rate,
        channel_names: job.channels.clone(),
    };
    let artifacts = emit(&job.model, &job.features, &platform).context("Code generation failed")?;

    let windows = segment(&job.table, &job.channels, &settings.segment).context("Segmentation failed")?;
    if windows.is_empty() {
        warn!("Recording is shorter than one window; nothing to score");
    }

    let vectors = extract_all(&windows, &job.features).context("Feature extraction failed")?;
    let scorer = job.model.scorer(job.features.len())?;
    let mut flagged = 0;
    for (window, features) in windows.iter().zip(&vectors) {
        let score = scorer.score(features)?;
        if scorer.is_anomaly(score) {
            flagged += 1;
            info!(
                "Window {} [{}..{}) flagged: score {:.4} > {:.4}",
                window.window_id,
                window.start_index,
                window.end_index,
                score,
                scorer.threshold()
            );
        }
    }
    info!("{} of {} windows exceed the threshold", flagged, windows.len());

    let files_written = write_artifacts(
        &args.output,
        &artifacts,
        job.model.kind(),
        settings.build_system,
        &settings.project_name,
    )?;

    Ok(RunSummary {
        windows: windows.len(),
        flagged,
        files_written,
        artifacts,
    })
}
