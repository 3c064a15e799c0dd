//! Command-line interface for biascheck.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::batch;
use crate::config::{AnalysisType, Config};
use crate::detect::BiasAnalyzer;
use crate::quick;
use crate::report::{self, AnalysisReport, BatchReport, QuickReport};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Path argument meaning "read from standard input".
const STDIN_PATH: &str = "-";

/// Inclusive language checker - detect biased wording in prose.
///
/// Biascheck scans job postings, marketing copy and other documents for
/// terms that may signal gender, racial, age, disability, socioeconomic or
/// religious bias, and scores the text from 0 (heavily biased) to 100.
#[derive(Parser)]
#[command(name = "biascheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the comprehensive analysis on a document
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Run the quick scan on a document
    Quick(QuickArgs),
    /// Analyze many documents at once
    Batch(BatchArgs),
    /// Create a biascheck.yaml config file
    Init(InitArgs),
}

/// Output format shared by all reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// File to analyze, or "-" for stdin
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Minimum acceptable score (exit non-zero if below)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Analysis type label recorded in the report
    #[arg(long = "type")]
    pub analysis_type: Option<AnalysisType>,
}

/// Arguments for the quick command.
#[derive(Parser)]
pub struct QuickArgs {
    /// File to scan, or "-" for stdin
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

/// Arguments for the batch command.
#[derive(Parser)]
pub struct BatchArgs {
    /// JSON file holding an array of strings, or a directory of documents
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Minimum acceptable score per document (exit non-zero if any is below)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Analysis type label recorded in the report
    #[arg(long = "type")]
    pub analysis_type: Option<AnalysisType>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "biascheck.yaml")]
    pub output: PathBuf,
}

/// Default config written by `biascheck init`.
const CONFIG_TEMPLATE: &str = include_str!("templates/biascheck.yaml");

/// Load the config, reporting problems on stderr.
fn load_config(path: Option<&Path>) -> Option<Config> {
    match Config::load(path) {
        Ok((config, found)) => {
            match found {
                Some(p) => debug!(path = %p.display(), "loaded config"),
                None => debug!("no config file found, using defaults"),
            }
            Some(config)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

/// Read a document from a file, or stdin when the path is "-".
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))
}

fn source_name(path: &Path) -> String {
    if path.as_os_str() == STDIN_PATH {
        "<stdin>".to_string()
    } else {
        path.to_string_lossy().to_string()
    }
}

fn resolve_threshold(arg: Option<f64>, config: &Config) -> Option<f64> {
    let threshold = arg.unwrap_or(config.threshold);
    if !(0.0..=100.0).contains(&threshold) {
        eprintln!(
            "Error: invalid threshold {}, must be between 0 and 100",
            threshold
        );
        return None;
    }
    Some(threshold)
}

/// Collect batch documents from a directory, sorted by path.
pub fn collect_documents(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden directories
            !(e.depth() > 0
                && e.file_type().is_dir()
                && e.file_name().to_string_lossy().starts_with('.'))
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if config.is_batch_extension(ext) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let Some(config) = load_config(args.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };
    let Some(threshold) = resolve_threshold(args.threshold, &config) else {
        return Ok(EXIT_ERROR);
    };
    let analysis_type = args.analysis_type.unwrap_or(config.analysis_type);

    let text = read_input(&args.path)?;
    if let Err(e) = batch::validate_content(&text, &config.limits) {
        eprintln!("Error: {}", e);
        return Ok(EXIT_ERROR);
    }

    let start = Instant::now();
    let result = BiasAnalyzer::new().analyze(&text);
    let report = AnalysisReport::new(&text, result, analysis_type, start.elapsed());
    info!(
        score = report.result.overall_score,
        findings = report.result.findings.len(),
        "analyzed {}",
        source_name(&args.path)
    );

    match args.format {
        OutputFormat::Json => report::write_json(&report)?,
        OutputFormat::Pretty => report::write_pretty(&source_name(&args.path), &report, threshold),
    }

    if report.result.passes(threshold) {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the quick command.
///
/// The quick scan has no pass/fail threshold; it exits 0 whenever the scan
/// runs.
pub fn run_quick(args: &QuickArgs) -> anyhow::Result<i32> {
    let Some(config) = load_config(args.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };

    let text = read_input(&args.path)?;
    if let Err(e) = batch::validate_quick(&text, &config.limits) {
        eprintln!("Error: {}", e);
        return Ok(EXIT_ERROR);
    }

    let start = Instant::now();
    let result = quick::quick_scan(&text);
    let report = QuickReport::new(&text, result, start.elapsed());

    match args.format {
        OutputFormat::Json => report::write_json(&report)?,
        OutputFormat::Pretty => report::write_pretty_quick(&source_name(&args.path), &report),
    }

    Ok(EXIT_SUCCESS)
}

/// Load batch texts from a JSON array file or a directory.
fn load_batch(path: &Path, config: &Config) -> anyhow::Result<Result<Vec<String>, String>> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("cannot access path {}: {}", path.display(), e))?;

    if metadata.is_dir() {
        let files = collect_documents(path, config)?;
        debug!(files = files.len(), "collected batch documents");
        let mut texts = Vec::with_capacity(files.len());
        for file in &files {
            texts.push(read_input(file)?);
        }
        return Ok(batch::validate_batch(&texts, &config.limits)
            .map(|()| texts)
            .map_err(|e| e.to_string()));
    }

    let content = read_input(path)?;
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => return Ok(Err(format!("invalid JSON in {}: {}", path.display(), e))),
    };
    Ok(batch::parse_batch(&value, &config.limits).map_err(|e| e.to_string()))
}

/// Run the batch command.
pub fn run_batch(args: &BatchArgs) -> anyhow::Result<i32> {
    let Some(config) = load_config(args.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };
    let Some(threshold) = resolve_threshold(args.threshold, &config) else {
        return Ok(EXIT_ERROR);
    };
    let analysis_type = args.analysis_type.unwrap_or(config.analysis_type);

    let texts = match load_batch(&args.path, &config)? {
        Ok(texts) => texts,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if texts.is_empty() {
        eprintln!("Warning: no documents to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let start = Instant::now();
    let outcome = batch::run_batch(&BiasAnalyzer::new(), &texts);
    let report = BatchReport::new(outcome, analysis_type, start.elapsed());

    let source = source_name(&args.path);
    match args.format {
        OutputFormat::Json => report::write_json(&report)?,
        OutputFormat::Pretty => report::write_pretty_batch(&source, &report, threshold),
    }

    let outcome = &report.outcome;
    let all_passed = outcome.aggregate_stats.failed == 0
        && outcome.successes().all(|r| r.passes(threshold));
    if all_passed {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to set your threshold and limits", args.output.display());
    println!(
        "  2. Run: biascheck analyze <file> --config {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}
