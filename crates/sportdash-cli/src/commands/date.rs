//! Date command - normalize written dates.

use clap::Args;
use console::style;

use sportdash_core::{normalize_date, NormalizedDate};

/// Arguments for the date command.
#[derive(Args)]
pub struct DateArgs {
    /// Dates to normalize, e.g. "3 januari 2025" or 03-01-2025
    #[arg(required = true)]
    values: Vec<String>,

    /// Fail when a value is not a recognized date
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: DateArgs) -> anyhow::Result<()> {
    let mut unrecognized = Vec::new();

    for value in &args.values {
        match normalize_date(value) {
            Some(NormalizedDate::Iso(date)) => println!("{}", date.format("%Y-%m-%d")),
            Some(NormalizedDate::Unrecognized(raw)) => {
                println!("{}", raw);
                unrecognized.push(raw);
            }
            None => println!(),
        }
    }

    if args.strict && !unrecognized.is_empty() {
        for raw in &unrecognized {
            eprintln!("{} Not a recognized date: {}", style("✗").red(), raw);
        }
        anyhow::bail!("{} value(s) could not be normalized", unrecognized.len());
    }

    Ok(())
}
