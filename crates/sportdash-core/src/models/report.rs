//! Session report record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score below which a report should be checked by a person before saving.
pub const DEFAULT_REVIEW_THRESHOLD: f32 = 0.7;

/// Parsing path recorded in [`ParsedReport::parsed_by`] by this crate.
pub const PARSED_BY_REGEX: &str = "regex";

/// Something that happened during a session and needs follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub description: String,
}

impl Incident {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Structured fields read from a staff-written session report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReport {
    /// Number of youths present.
    pub present_youth: Option<u32>,

    /// Mood in the group.
    pub mood: String,

    /// How the session went.
    pub session_summary: String,

    /// Incidents mentioned in the report.
    pub incidents: Vec<Incident>,

    /// Share of the expected fields that were found (0.0 - 1.0).
    pub confidence_score: f32,

    /// Fields that lowered the confidence score.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,

    /// Text the report was parsed from.
    pub raw_text: String,

    /// When the text was parsed.
    pub parsed_at: DateTime<Utc>,

    /// Which parsing path produced the record.
    pub parsed_by: String,
}

impl ParsedReport {
    /// Whether the score is below `threshold` and a person should check the
    /// record before it is saved.
    pub fn needs_review(&self, threshold: f32) -> bool {
        self.confidence_score < threshold
    }
}
