//! Session report parser: staff-written report text to [`ParsedReport`].

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, info};

use crate::models::config::{ExtractionConfig, SportdashConfig};
use crate::models::report::{Incident, ParsedReport, PARSED_BY_REGEX};

use super::rules::patterns::{
    BULLET, FIRST_NUMBER, INCIDENTS, INCIDENT_KEYWORD, MOOD, NEGATION, NOTHING_TO_REPORT,
    PRESENT_YOUTH, PRESENT_YOUTH_INLINE, SESSION_SUMMARY,
};
use super::rules::{Document, Fallback, FieldRule, FieldScanner, SectionExtractor};
use super::TextParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    PresentYouth,
    Mood,
}

fn field_rules() -> [FieldRule<Field>; 2] {
    [
        FieldRule::new(Field::PresentYouth, &PRESENT_YOUTH, Fallback::NextLine),
        FieldRule::new(Field::Mood, &MOOD, Fallback::NextLine),
    ]
}

fn section_boundaries() -> [&'static Regex; 4] {
    [&*PRESENT_YOUTH, &*MOOD, &*SESSION_SUMMARY, &*INCIDENTS]
}

// Score points per field, out of 100.
const PRESENT_YOUTH_POINTS: u32 = 30;
const MOOD_POINTS: u32 = 20;
const SUMMARY_POINTS: u32 = 30;
const INCIDENTS_POINTS: u32 = 20;

/// Incidents found in a report, and whether the report addressed them at all.
struct IncidentScan {
    incidents: Vec<Incident>,
    stated: bool,
}

/// Parser for session reports.
#[derive(Debug, Clone)]
pub struct ReportParser {
    scanner: FieldScanner,
    sections: SectionExtractor,
    parsed_by: String,
}

impl ReportParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            scanner: FieldScanner::new(),
            sections: SectionExtractor::new(),
            parsed_by: PARSED_BY_REGEX.to_string(),
        }
    }

    /// Create a parser using the settings from a config file.
    pub fn from_config(config: &SportdashConfig) -> Self {
        let extraction: &ExtractionConfig = &config.extraction;

        Self {
            scanner: FieldScanner::new().with_lookahead_max_chars(extraction.lookahead_max_chars),
            sections: SectionExtractor::new().with_char_limit(extraction.section_char_limit),
            parsed_by: config.report.parsed_by.clone(),
        }
    }

    /// Set the value recorded as the parsing path.
    pub fn with_parsed_by(mut self, parsed_by: impl Into<String>) -> Self {
        self.parsed_by = parsed_by.into();
        self
    }

    /// Parse a report, stamping it with `parsed_at` instead of the current
    /// time. Same input and timestamp always give the same record.
    pub fn parse_at(&self, text: &str, parsed_at: DateTime<Utc>) -> ParsedReport {
        info!("Parsing report from {} characters of text", text.len());

        let doc = Document::new(text);
        let fields = self.scanner.scan(&doc, &field_rules());
        let boundaries = section_boundaries();

        let present_youth = fields
            .value(Field::PresentYouth)
            .and_then(|v| FIRST_NUMBER.find(v))
            .and_then(|m| m.as_str().parse().ok())
            .or_else(|| {
                PRESENT_YOUTH_INLINE
                    .captures(text)
                    .and_then(|c| c[1].parse().ok())
            });

        let mood = fields.value_or(Field::Mood, "");

        let session_summary = self
            .sections
            .extract(&doc, &SESSION_SUMMARY, &boundaries)
            .unwrap_or_default();

        let scan = self.scan_incidents(&doc, &boundaries);

        let mut points = 0;
        let mut missing_fields = Vec::new();
        for (found, field, weight) in [
            (present_youth.is_some(), "presentYouth", PRESENT_YOUTH_POINTS),
            (!mood.is_empty(), "mood", MOOD_POINTS),
            (!session_summary.is_empty(), "sessionSummary", SUMMARY_POINTS),
            (scan.stated, "incidents", INCIDENTS_POINTS),
        ] {
            if found {
                points += weight;
            } else {
                missing_fields.push(field.to_string());
            }
        }
        let confidence_score = (points as f32 / 100.0).clamp(0.0, 1.0);

        debug!(
            "Extracted report with {} incidents and confidence {:.2}",
            scan.incidents.len(),
            confidence_score
        );

        ParsedReport {
            present_youth,
            mood,
            session_summary,
            incidents: scan.incidents,
            confidence_score,
            missing_fields,
            raw_text: text.to_string(),
            parsed_at,
            parsed_by: self.parsed_by.clone(),
        }
    }

    /// Read incidents from the incidents section, or pick out lines with
    /// incident keywords when the report has no such section.
    fn scan_incidents(&self, doc: &Document<'_>, boundaries: &[&Regex]) -> IncidentScan {
        if let Some(section) = self.sections.extract(doc, &INCIDENTS, boundaries) {
            let incidents: Vec<Incident> = section
                .lines()
                .map(|line| BULLET.replace(line.trim(), "").trim().to_string())
                .filter(|line| !line.is_empty() && !NOTHING_TO_REPORT.is_match(line))
                .map(Incident::new)
                .collect();
            return IncidentScan {
                stated: !section.is_empty(),
                incidents,
            };
        }

        let mut incidents: Vec<Incident> = Vec::new();
        for line in doc.lines() {
            if !INCIDENT_KEYWORD.is_match(line) || NEGATION.is_match(line) {
                continue;
            }
            let description = BULLET.replace(line, "").trim().to_string();
            if !incidents.iter().any(|i| i.description == description) {
                incidents.push(Incident::new(description));
            }
        }

        IncidentScan {
            stated: !incidents.is_empty(),
            incidents,
        }
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TextParser for ReportParser {
    type Output = ParsedReport;

    fn parse(&self, text: &str) -> ParsedReport {
        self.parse_at(text, Utc::now())
    }
}
