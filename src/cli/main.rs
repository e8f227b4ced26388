//! Image Brightness CLI Tool
//!
//! Command-line interface for measuring the average brightness of image files.

use super::config::CliConfigBuilder;
use crate::{
    analyzer::{BrightnessAnalyzer, BrightnessReport},
    services::ImageIOService,
    tracing_config::spans,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn, Instrument};

/// Extensions picked up when scanning directories
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff", "tif"];

/// Image brightness CLI tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "image-brightness")]
pub struct Cli {
    /// Input image files or directories
    #[arg(value_name = "INPUT", required = true)]
    pub input: Vec<PathBuf>,

    /// Number of column partitions (0 = one per CPU, 1 = sequential)
    #[arg(short, long, default_value_t = 0)]
    pub splits: usize,

    /// Luminance weights
    #[arg(short, long, value_enum, default_value_t = CliWeights::Rec709)]
    pub weights: CliWeights,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliOutputFormat::Text)]
    pub format: CliOutputFormat,

    /// Process directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Pattern for directory scans (e.g., "*.jpg")
    #[arg(long)]
    pub pattern: Option<String>,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Stop at the first input that fails to load or analyze
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliOutputFormat {
    /// `<path>: <percentage>%`
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliWeights {
    Rec709,
    Rec601,
}

/// One line of JSON output
#[derive(Debug, Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    format: &'static str,
    #[serde(flatten)]
    report: &'a BrightnessReport,
}

/// Counts for one batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchOutcome {
    pub(crate) analyzed: usize,
    pub(crate) failed: usize,
}

pub async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose).context("Failed to initialize tracing")?;

    let config = CliConfigBuilder::from_cli(&cli).context("Failed to build configuration")?;
    let analyzer = BrightnessAnalyzer::new(config);
    debug!(config = ?analyzer.config(), "Analyzer configured");

    let files = collect_inputs(&cli.input, cli.recursive, cli.pattern.as_deref())?;
    if files.is_empty() {
        warn!("No supported image files found in the provided inputs");
        return Ok(());
    }
    info!("Found {} image file(s) to analyze", files.len());

    let mut stdout = io::stdout();
    let outcome = analyze_files(&analyzer, &files, cli.format, cli.fail_fast, &mut stdout)
        .instrument(spans::batch(files.len()))
        .await?;

    if outcome.failed > 0 {
        anyhow::bail!(
            "{} of {} input(s) could not be analyzed",
            outcome.failed,
            files.len()
        );
    }

    Ok(())
}

fn init_tracing(verbose_count: u8) -> Result<()> {
    use crate::tracing_config::{TracingConfig, TracingFormat};

    let mut config = TracingConfig::new()
        .with_verbosity(verbose_count)
        .with_format(TracingFormat::Console);

    if let Ok(filter) = std::env::var("RUST_LOG") {
        config = config.with_env_filter(filter);
    }

    config.init().context("Failed to initialize tracing subscriber")?;
    debug!(verbosity = verbose_count, "Tracing initialized");
    Ok(())
}

/// Expand inputs into a sorted, de-duplicated list of files
///
/// Explicit files are always kept; their content decides whether they are
/// images. Directory entries are filtered by extension and `pattern`.
pub(crate) fn collect_inputs(
    inputs: &[PathBuf],
    recursive: bool,
    pattern: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let mut all_files = Vec::new();

    for path in inputs {
        if path.is_dir() {
            let dir_files = find_image_files(path, recursive, pattern)
                .with_context(|| format!("Failed to scan directory: {}", path.display()))?;
            all_files.extend(dir_files);
        } else {
            // Missing files surface as load errors for that input
            all_files.push(path.clone());
        }
    }

    all_files.sort();
    all_files.dedup();
    Ok(all_files)
}

/// Find all image files in a directory
fn find_image_files(dir: &Path, recursive: bool, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let max_depth = if recursive { usize::MAX } else { 1 };

    for entry in walkdir::WalkDir::new(dir).max_depth(max_depth) {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.path();
            if is_image_file(path, IMAGE_EXTENSIONS) && matches_pattern(path, pattern) {
                files.push(path.to_path_buf());
            }
        }
    }

    Ok(files)
}

/// Check if file is an image based on extension
fn is_image_file(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext.to_lowercase().as_str()))
}

/// Check if file matches the given pattern
fn matches_pattern(path: &Path, pattern: Option<&str>) -> bool {
    match pattern {
        Some(pat) => path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|filename| {
                glob::Pattern::new(pat)
                    .map(|p| p.matches(filename))
                    .unwrap_or(false)
            }),
        None => true,
    }
}

/// Analyze each file in order, writing one result line per success
pub(crate) async fn analyze_files<W: Write>(
    analyzer: &BrightnessAnalyzer,
    files: &[PathBuf],
    format: CliOutputFormat,
    fail_fast: bool,
    out: &mut W,
) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();
    let splits = analyzer.config().parallelism.map_or(1, |n| n.get());

    for path in files {
        let result = analyze_file(analyzer, path)
            .instrument(spans::file_analysis(path, splits))
            .await;

        match result {
            Ok((report, format_name)) => {
                write_report(out, path, format_name, &report, format)?;
                outcome.analyzed += 1;
            },
            Err(e) if fail_fast => {
                return Err(e.context(format!("Failed to analyze {}", path.display())));
            },
            Err(e) => {
                error!("{}: {:#}", path.display(), e);
                outcome.failed += 1;
            },
        }
    }

    out.flush().context("Failed to flush output")?;
    Ok(outcome)
}

async fn analyze_file(
    analyzer: &BrightnessAnalyzer,
    path: &Path,
) -> Result<(BrightnessReport, &'static str)> {
    let owned = path.to_path_buf();
    let loaded = tokio::task::spawn_blocking(move || ImageIOService::load_image(owned))
        .await
        .context("Image loading task failed")??;

    let format_name = loaded.format_name();
    let report = analyzer.analyze(loaded.into_shared()).await?;
    info!(
        percentage = report.percentage,
        pixels = report.pixel_count,
        "Analyzed {} image",
        format_name
    );
    Ok((report, format_name))
}

fn write_report<W: Write>(
    out: &mut W,
    path: &Path,
    format_name: &'static str,
    report: &BrightnessReport,
    format: CliOutputFormat,
) -> Result<()> {
    match format {
        CliOutputFormat::Text => {
            writeln!(out, "{}: {}%", path.display(), report.percentage)?;
        },
        CliOutputFormat::Json => {
            let line = serde_json::to_string(&FileReport {
                path,
                format: format_name,
                report,
            })?;
            writeln!(out, "{}", line)?;
        },
    }
    Ok(())
}
