//! Indication and report commands - parse a single text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use sportdash_core::{IndicationParser, ParseRequest, ReportParser, TextParser};

use super::config::load_config;
use super::output::{format_indication, format_report, OutputFormat};

/// Arguments shared by the indication and report commands.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file, `-` reads stdin
    #[arg(default_value = "-")]
    input: String,

    /// Treat the input as a JSON request body ({"text": "..."})
    #[arg(long)]
    request: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List fields that need a reviewer's attention
    #[arg(long)]
    validate: bool,
}

pub async fn run_indication(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = read_text(&args.input, args.request)?;
    let parser = IndicationParser::from_config(&config.extraction);
    let record = parser.parse(&text);

    if args.validate {
        print_notes(&record.review_notes());
    }

    let output = format_indication(&record, args.format)?;
    write_output(args.output.as_ref(), &output)?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

pub async fn run_report(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = read_text(&args.input, args.request)?;
    let parser = ReportParser::from_config(&config);
    let report = parser.parse(&text);

    let threshold = config.report.review_threshold;
    if report.needs_review(threshold) {
        eprintln!(
            "{} Confidence {:.2} is below {:.2}, review before saving",
            style("⚠").yellow(),
            report.confidence_score,
            threshold
        );
    }

    if args.validate {
        let notes: Vec<String> = report
            .missing_fields
            .iter()
            .map(|field| format!("Missing {}", field))
            .collect();
        print_notes(&notes);
    }

    let output = format_report(&report, args.format)?;
    write_output(args.output.as_ref(), &output)?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

/// Read the text to parse from a file or stdin, decoding a request body
/// when asked to.
pub fn read_text(input: &str, request: bool) -> anyhow::Result<String> {
    let raw = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        let path = PathBuf::from(input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        fs::read_to_string(&path)?
    };

    info!("Read {} bytes from {}", raw.len(), input);

    if !request {
        return Ok(raw);
    }

    ParseRequest::from_json(&raw).map_err(|e| {
        anyhow::anyhow!("Rejected request body (status {}): {}", e.status_code(), e)
    })
}

fn print_notes(notes: &[String]) {
    if notes.is_empty() {
        return;
    }
    eprintln!("{}", style("Review notes:").yellow());
    for note in notes {
        eprintln!("  - {}", note);
    }
}

fn write_output(path: Option<&PathBuf>, output: &str) -> anyhow::Result<()> {
    if let Some(output_path) = path {
        fs::write(output_path, output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }
    Ok(())
}
