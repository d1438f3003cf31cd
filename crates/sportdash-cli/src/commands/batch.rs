//! Batch processing command for multiple text files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use sportdash_core::models::{ParsedIndication, ParsedReport};
use sportdash_core::{IndicationParser, ReportParser, SportdashConfig, TextParser};

use super::config::load_config;
use super::output::{activity_labels, date_cell, format_indication, format_report, OutputFormat};
use super::parse::read_text;

/// Kind of text the input files hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    /// Activity indications
    Indication,
    /// Session reports
    Report,
}

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Kind of text in the input files
    #[arg(short, long, value_enum, default_value = "indication")]
    kind: Kind,

    /// Treat each file as a JSON request body ({"text": "..."})
    #[arg(long)]
    request: bool,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Record parsed from one file.
enum Parsed {
    Indication(ParsedIndication),
    Report(ParsedReport),
}

/// Result of processing a single file.
struct ProcessResult {
    index: usize,
    path: PathBuf,
    parsed: Option<Parsed>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// Parsers shared by all workers.
struct Parsers {
    indication: IndicationParser,
    report: ReportParser,
}

impl Parsers {
    fn from_config(config: &SportdashConfig) -> Self {
        Self {
            indication: IndicationParser::from_config(&config.extraction),
            report: ReportParser::from_config(config),
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parsers = Arc::new(Parsers::from_config(&config));
    let workers = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = workers.clone().acquire_owned().await?;
        let parsers = Arc::clone(&parsers);
        let pb = overall_pb.clone();
        let (kind, request) = (args.kind, args.request);

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = process_single_file(&path, &parsers, kind, request);
            pb.inc(1);

            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            match outcome {
                Ok(parsed) => ProcessResult {
                    index,
                    path,
                    parsed: Some(parsed),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => ProcessResult {
                    index,
                    path,
                    parsed: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                },
            }
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let result = joined?;

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                tasks.abort_all();
                overall_pb.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push(result);
    }
    results.sort_by_key(|r| r.index);

    overall_pb.finish_with_message("Complete");

    // Write outputs
    let successful: Vec<_> = results.iter().filter(|r| r.parsed.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        let output_names = unique_output_names(successful.iter().map(|r| r.path.as_path()));
        for (result, output_name) in successful.iter().zip(&output_names) {
            if let Some(parsed) = &result.parsed {
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                let content = match parsed {
                    Parsed::Indication(record) => format_indication(record, args.format)?,
                    Parsed::Report(report) => format_report(report, args.format)?,
                };

                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results, config.report.review_threshold)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output file names for the inputs, in order.
///
/// The file stem is used as is unless an earlier input already took it;
/// later inputs with the same stem get a `-2`, `-3`, ... suffix.
fn unique_output_names<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Vec<String> {
    let mut used = HashSet::new();

    paths
        .into_iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("record");

            let mut name = stem.to_string();
            let mut suffix = 2;
            while !used.insert(name.clone()) {
                name = format!("{}-{}", stem, suffix);
                suffix += 1;
            }

            if name != stem {
                warn!(
                    "Output name {} already taken, writing {} as {}",
                    stem,
                    path.display(),
                    name
                );
            }
            name
        })
        .collect()
}

fn process_single_file(
    path: &Path,
    parsers: &Parsers,
    kind: Kind,
    request: bool,
) -> anyhow::Result<Parsed> {
    let input = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Path is not valid UTF-8: {}", path.display()))?;
    let text = read_text(input, request)?;

    Ok(match kind {
        Kind::Indication => Parsed::Indication(parsers.indication.parse(&text)),
        Kind::Report => Parsed::Report(parsers.report.parse(&text)),
    })
}

fn write_summary(path: &Path, results: &[ProcessResult], threshold: f32) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "subject_name",
        "activities",
        "valid_from",
        "valid_until",
        "present_youth",
        "incidents",
        "confidence",
        "needs_review",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        match &result.parsed {
            Some(Parsed::Indication(record)) => wtr.write_record([
                filename,
                "success",
                &record.subject_name,
                &activity_labels(record),
                &date_cell(&record.valid_from),
                &date_cell(&record.valid_until),
                "",
                "",
                "",
                "",
                &time_ms,
                "",
            ])?,
            Some(Parsed::Report(report)) => wtr.write_record([
                filename,
                "success",
                "",
                "",
                "",
                "",
                &report.present_youth.map(|n| n.to_string()).unwrap_or_default(),
                &report.incidents.len().to_string(),
                &format!("{:.2}", report.confidence_score),
                if report.needs_review(threshold) { "yes" } else { "no" },
                &time_ms,
                "",
            ])?,
            None => wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &time_ms,
                result.error.as_deref().unwrap_or(""),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
