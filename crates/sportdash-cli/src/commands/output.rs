//! Output formatting for parsed records.

use chrono::SecondsFormat;

use sportdash_core::models::{ParsedIndication, ParsedReport};
use sportdash_core::NormalizedDate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for files written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn format_indication(record: &ParsedIndication, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => indication_csv(record),
        OutputFormat::Text => Ok(indication_text(record)),
    }
}

pub fn format_report(report: &ParsedReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => report_csv(report),
        OutputFormat::Text => Ok(report_text(report)),
    }
}

/// Activity labels joined for a single cell or line.
pub fn activity_labels(record: &ParsedIndication) -> String {
    record
        .activity_flags
        .iter()
        .map(|flag| flag.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn date_cell(date: &Option<NormalizedDate>) -> String {
    date.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "ja",
        Some(false) => "nee",
        None => "",
    }
}

fn indication_csv(record: &ParsedIndication) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "subject_name",
        "group_name",
        "activities",
        "activity_advice",
        "validity_range",
        "valid_from",
        "valid_until",
        "issued_by",
        "feedback_recipient",
        "combinable_with_peer",
        "justification",
        "approach_tips",
        "learning_goals",
    ])?;

    wtr.write_record([
        record.subject_name.as_str(),
        &record.group_name,
        &activity_labels(record),
        &record.activity_advice,
        &record.validity_range_text,
        &date_cell(&record.valid_from),
        &date_cell(&record.valid_until),
        &record.issued_by,
        &record.feedback_recipient,
        yes_no(record.combinable_with_peer),
        &record.justification_text,
        &record.approach_tips,
        &record.learning_goals,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn report_csv(report: &ParsedReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "present_youth",
        "mood",
        "session_summary",
        "incidents",
        "confidence",
        "missing_fields",
        "parsed_at",
        "parsed_by",
    ])?;

    let incidents = report
        .incidents
        .iter()
        .map(|i| i.description.as_str())
        .collect::<Vec<_>>()
        .join(" | ");

    wtr.write_record([
        report.present_youth.map(|n| n.to_string()).unwrap_or_default().as_str(),
        &report.mood,
        &report.session_summary,
        &incidents,
        &format!("{:.2}", report.confidence_score),
        &report.missing_fields.join(";"),
        &report.parsed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        &report.parsed_by,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn push_section(output: &mut String, title: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    output.push_str(&format!("\n{}:\n", title));
    for line in body.lines() {
        output.push_str(&format!("  {}\n", line));
    }
}

fn indication_text(record: &ParsedIndication) -> String {
    let mut output = String::new();

    output.push_str(&format!("Subject: {}\n", record.subject_name));
    if !record.group_name.is_empty() {
        output.push_str(&format!("Group: {}\n", record.group_name));
    }
    output.push_str(&format!("Activities: {}\n", activity_labels(record)));
    output.push_str(&format!("Advice: {}\n", record.activity_advice));
    output.push_str(&format!(
        "Valid: {} - {}\n",
        date_cell(&record.valid_from),
        date_cell(&record.valid_until)
    ));
    if !record.issued_by.is_empty() {
        output.push_str(&format!("Issued by: {}\n", record.issued_by));
    }
    if !record.feedback_recipient.is_empty() {
        output.push_str(&format!("Feedback to: {}\n", record.feedback_recipient));
    }
    let combinable = match record.combinable_with_peer {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };
    output.push_str(&format!("Combinable with peer: {}\n", combinable));

    push_section(&mut output, "Justification", &record.justification_text);
    push_section(&mut output, "Approach", &record.approach_tips);
    push_section(&mut output, "Learning goals", &record.learning_goals);

    output
}

fn report_text(report: &ParsedReport) -> String {
    let mut output = String::new();

    match report.present_youth {
        Some(n) => output.push_str(&format!("Present: {}\n", n)),
        None => output.push_str("Present: unknown\n"),
    }
    if !report.mood.is_empty() {
        output.push_str(&format!("Mood: {}\n", report.mood));
    }

    push_section(&mut output, "Summary", &report.session_summary);

    if !report.incidents.is_empty() {
        output.push_str("\nIncidents:\n");
        for incident in &report.incidents {
            output.push_str(&format!("  - {}\n", incident.description));
        }
    }

    output.push_str(&format!(
        "\nConfidence: {:.0}%\n",
        report.confidence_score * 100.0
    ));
    if !report.missing_fields.is_empty() {
        output.push_str(&format!("Missing: {}\n", report.missing_fields.join(", ")));
    }

    output
}
