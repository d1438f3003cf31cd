//! Activity indication record.

use serde::{Deserialize, Serialize};

use crate::parser::rules::NormalizedDate;

/// Name used when the text does not mention the youth's name.
pub const UNKNOWN_SUBJECT: &str = "Onbekend";

/// Advice used when the text gives none.
pub const NO_ADVICE: &str = "-";

/// Supervised activity an indication can authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityFlag {
    /// Sport (sport).
    Sport,
    /// Music (muziek).
    Music,
    /// Creative activities (creatief).
    Creative,
}

impl ActivityFlag {
    /// Dutch label as used on the indication form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sport => "Sport",
            Self::Music => "Muziek",
            Self::Creative => "Creatief",
        }
    }
}

/// Structured fields read from one pasted indication.
///
/// Every field has a default, so a record always exists even for text
/// that contains none of the expected labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIndication {
    /// Youth the indication is for.
    pub subject_name: String,

    /// Residential group (leefgroep).
    pub group_name: String,

    /// Activities marked with an X, in the order Sport, Music, Creative.
    pub activity_flags: Vec<ActivityFlag>,

    /// Advice about the activities.
    pub activity_advice: String,

    /// Validity period exactly as written.
    pub validity_range_text: String,

    /// Start of the validity period.
    pub valid_from: Option<NormalizedDate>,

    /// End of the validity period.
    pub valid_until: Option<NormalizedDate>,

    /// Who issued the indication.
    pub issued_by: String,

    /// Who receives feedback about the activities.
    pub feedback_recipient: String,

    /// Whether the activity can be combined with a peer's indication.
    /// `None` when the text does not say.
    pub combinable_with_peer: Option<bool>,

    /// Rationale for the indication.
    pub justification_text: String,

    /// Guidance for the supervising staff.
    pub approach_tips: String,

    /// Learning goals, or `"N.v.t."` when not applicable.
    pub learning_goals: String,
}

impl ParsedIndication {
    /// Create a record holding only default values.
    pub fn new() -> Self {
        Self {
            subject_name: UNKNOWN_SUBJECT.to_string(),
            group_name: String::new(),
            activity_flags: Vec::new(),
            activity_advice: NO_ADVICE.to_string(),
            validity_range_text: String::new(),
            valid_from: None,
            valid_until: None,
            issued_by: String::new(),
            feedback_recipient: String::new(),
            combinable_with_peer: None,
            justification_text: String::new(),
            approach_tips: String::new(),
            learning_goals: String::new(),
        }
    }

    /// List the fields a reviewer should look at before saving.
    pub fn review_notes(&self) -> Vec<String> {
        let mut notes = Vec::new();

        if self.subject_name == UNKNOWN_SUBJECT {
            notes.push("Missing subject name".to_string());
        }

        if self.activity_flags.is_empty() {
            notes.push("No activity marked".to_string());
        }

        for (label, date) in [("start", &self.valid_from), ("end", &self.valid_until)] {
            match date {
                None => notes.push(format!("Missing {} date", label)),
                Some(d) if !d.is_recognized() => {
                    notes.push(format!("Unrecognized {} date: {}", label, d))
                }
                Some(_) => {}
            }
        }

        let from = self.valid_from.as_ref().and_then(NormalizedDate::as_iso);
        let until = self.valid_until.as_ref().and_then(NormalizedDate::as_iso);
        if let (Some(from), Some(until)) = (from, until) {
            if until < from {
                notes.push(format!("End date {} is before start date {}", until, from));
            }
        }

        notes
    }
}

impl Default for ParsedIndication {
    fn default() -> Self {
        Self::new()
    }
}
