//! Indication parser: pasted indication text to [`ParsedIndication`].

use regex::Regex;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::indication::{ParsedIndication, NO_ADVICE, UNKNOWN_SUBJECT};

use super::rules::patterns::*;
use super::rules::sections::normalize_learning_goals;
use super::rules::{
    detect_activity_flags, is_placeholder, normalize_date, parse_tri_state, split_date_range,
    Document, ExtractedFields, Fallback, FieldRule, FieldScanner, NormalizedDate,
    SectionExtractor,
};
use super::TextParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    SubjectName,
    GroupName,
    ActivityAdvice,
    ValidityRange,
    ValidFrom,
    ValidUntil,
    IssuedBy,
    FeedbackRecipient,
    Combinable,
}

fn field_rules() -> [FieldRule<Field>; 9] {
    [
        FieldRule::new(Field::SubjectName, &SUBJECT_NAME, Fallback::NextLine),
        FieldRule::new(Field::GroupName, &GROUP_NAME, Fallback::NextLine),
        FieldRule::new(Field::ActivityAdvice, &ACTIVITY_ADVICE, Fallback::NextLine),
        FieldRule::new(Field::ValidityRange, &VALIDITY_RANGE, Fallback::NextLine),
        FieldRule::new(Field::ValidFrom, &VALID_FROM, Fallback::NextLine),
        FieldRule::new(Field::ValidUntil, &VALID_UNTIL, Fallback::NextLine),
        FieldRule::new(Field::IssuedBy, &ISSUED_BY, Fallback::NextLine),
        FieldRule::new(Field::FeedbackRecipient, &FEEDBACK_RECIPIENT, Fallback::NextLine),
        FieldRule::new(Field::Combinable, &COMBINABLE, Fallback::NextLine),
    ]
}

/// Labels that end a free-text section.
fn section_boundaries(own: &Regex) -> Vec<&'static Regex> {
    let all: [&'static Regex; 13] = [
        &*SUBJECT_NAME,
        &*GROUP_NAME,
        &*ACTIVITY_ADVICE,
        &*VALIDITY_RANGE,
        &*VALID_FROM,
        &*VALID_UNTIL,
        &*ACTIVITY_ROW,
        &*ISSUED_BY,
        &*FEEDBACK_RECIPIENT,
        &*COMBINABLE,
        &*JUSTIFICATION,
        &*APPROACH_TIPS,
        &*LEARNING_GOALS,
    ];
    all.into_iter()
        .filter(|label| label.as_str() != own.as_str())
        .collect()
}

/// Parser for pasted activity indications.
#[derive(Debug, Clone)]
pub struct IndicationParser {
    scanner: FieldScanner,
    sections: SectionExtractor,
}

impl IndicationParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            scanner: FieldScanner::new(),
            sections: SectionExtractor::new(),
        }
    }

    /// Create a parser using the extraction settings from a config file.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_section_char_limit(config.section_char_limit)
            .with_lookahead_max_chars(config.lookahead_max_chars)
    }

    /// Set the maximum length of the free-text sections.
    pub fn with_section_char_limit(mut self, char_limit: usize) -> Self {
        self.sections = self.sections.with_char_limit(char_limit);
        self
    }

    /// Set the length limit for values taken from the next line.
    pub fn with_lookahead_max_chars(mut self, max_chars: usize) -> Self {
        self.scanner = self.scanner.with_lookahead_max_chars(max_chars);
        self
    }

    fn section(&self, doc: &Document<'_>, start: &Regex) -> String {
        self.sections
            .extract(doc, start, &section_boundaries(start))
            .unwrap_or_default()
    }

    /// Read the validity period.
    ///
    /// The combined "van - tot" field is tried first; separate start and end
    /// fields only fill in dates it left absent.
    fn extract_validity(
        &self,
        fields: &ExtractedFields<Field>,
    ) -> (String, Option<NormalizedDate>, Option<NormalizedDate>) {
        let combined = fields.raw(Field::ValidityRange).map(|m| m.value.as_str());
        let (mut from, mut until) = combined.map(split_date_range).unwrap_or((None, None));

        let separate_from = fields.value(Field::ValidFrom);
        let separate_until = fields.value(Field::ValidUntil);
        if from.is_none() {
            from = separate_from.and_then(normalize_date);
        }
        if until.is_none() {
            until = separate_until.and_then(normalize_date);
        }

        let range_text = match combined {
            Some(text) if !is_placeholder(text) => text.to_string(),
            _ => match (separate_from, separate_until) {
                (None, None) => combined.unwrap_or_default().to_string(),
                (start, end) => format!("{} - {}", start.unwrap_or(""), end.unwrap_or(""))
                    .trim()
                    .to_string(),
            },
        };

        (range_text, from, until)
    }
}

impl Default for IndicationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TextParser for IndicationParser {
    type Output = ParsedIndication;

    fn parse(&self, text: &str) -> ParsedIndication {
        info!("Parsing indication from {} characters of text", text.len());

        let doc = Document::new(text);
        let fields = self.scanner.scan(&doc, &field_rules());
        let (validity_range_text, valid_from, valid_until) = self.extract_validity(&fields);

        let record = ParsedIndication {
            subject_name: fields.value_or(Field::SubjectName, UNKNOWN_SUBJECT),
            group_name: fields.value_or(Field::GroupName, ""),
            activity_flags: detect_activity_flags(doc.text()),
            activity_advice: fields.value_or(Field::ActivityAdvice, NO_ADVICE),
            validity_range_text,
            valid_from,
            valid_until,
            issued_by: fields.value_or(Field::IssuedBy, ""),
            feedback_recipient: fields.value_or(Field::FeedbackRecipient, ""),
            combinable_with_peer: parse_tri_state(fields.value(Field::Combinable)),
            justification_text: self.section(&doc, &JUSTIFICATION),
            approach_tips: self.section(&doc, &APPROACH_TIPS),
            learning_goals: normalize_learning_goals(self.section(&doc, &LEARNING_GOALS)),
        };

        debug!(
            "Extracted indication for {} with {} labeled fields and {} activities",
            record.subject_name,
            fields.len(),
            record.activity_flags.len()
        );

        record
    }
}
