//! Multi-line section capture.

use regex::Regex;
use tracing::trace;

use super::patterns::NOT_APPLICABLE;
use super::Document;

/// Default cap on captured section length, in characters.
pub const DEFAULT_SECTION_CHAR_LIMIT: usize = 3000;

/// Canonical value for a not-applicable learning goals section.
pub const NOT_APPLICABLE_TEXT: &str = "N.v.t.";

/// Captures free-text blocks that run from a start label to the next label.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    char_limit: usize,
}

impl SectionExtractor {
    pub fn new() -> Self {
        Self {
            char_limit: DEFAULT_SECTION_CHAR_LIMIT,
        }
    }

    /// Set the maximum length of a captured section.
    pub fn with_char_limit(mut self, char_limit: usize) -> Self {
        self.char_limit = char_limit;
        self
    }

    /// Capture the section that starts at the first line matching `start`.
    ///
    /// The section is the original text from the end of the start label up
    /// to the first later line matching any of `next_labels`, so paragraph
    /// breaks and indentation survive. Returns `None` when the start label
    /// does not occur; an empty section is `Some("")`. Longer captures are
    /// cut to the character limit.
    pub fn extract(
        &self,
        doc: &Document<'_>,
        start: &Regex,
        next_labels: &[&Regex],
    ) -> Option<String> {
        let lines = doc.lines();
        let (index, inline_start) = lines.iter().enumerate().find_map(|(i, line)| {
            start
                .captures(line)
                .map(|caps| (i, caps.get(1).map_or(line.len(), |m| m.start())))
        })?;

        let end_line = lines
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, line)| next_labels.iter().any(|label| label.is_match(line)))
            .map_or(lines.len(), |(i, _)| i);

        let text = doc.text();
        let from = doc.line_start(index) + inline_start;
        let to = doc.line_start(end_line).max(from);
        let captured = text[from..to].trim();
        trace!(
            line = index,
            until = end_line,
            chars = captured.chars().count(),
            "captured section"
        );

        Some(truncate_chars(captured, self.char_limit))
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `text` to at most `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Collapse any learning goals text that mentions n.v.t. to `"N.v.t."`.
pub fn normalize_learning_goals(text: String) -> String {
    if NOT_APPLICABLE.is_match(&text) {
        NOT_APPLICABLE_TEXT.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::rules::patterns::{APPROACH_TIPS, JUSTIFICATION, LEARNING_GOALS};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_until_next_label() {
        let doc = Document::new(
            "Onderbouwing indicatie:\nHeeft veel energie.\nSport helpt.\nTips: rustig blijven\nLeerdoelen: samenwerken",
        );
        let section = SectionExtractor::new()
            .extract(&doc, &JUSTIFICATION, &[&*APPROACH_TIPS, &*LEARNING_GOALS])
            .unwrap();
        assert_eq!(section, "Heeft veel energie.\nSport helpt.");
    }

    #[test]
    fn test_section_keeps_inline_text() {
        let doc = Document::new("Tips: rustig blijven\nduidelijke grenzen\nLeerdoelen: geen");
        let section = SectionExtractor::new()
            .extract(&doc, &APPROACH_TIPS, &[&*LEARNING_GOALS])
            .unwrap();
        assert_eq!(section, "rustig blijven\nduidelijke grenzen");
    }

    #[test]
    fn test_section_runs_to_end_of_document() {
        let doc = Document::new("Leerdoelen:\nop tijd komen\nafspraken nakomen");
        let section = SectionExtractor::new()
            .extract(&doc, &LEARNING_GOALS, &[&*JUSTIFICATION])
            .unwrap();
        assert_eq!(section, "op tijd komen\nafspraken nakomen");
    }

    #[test]
    fn test_section_keeps_paragraph_breaks() {
        let doc = Document::new("Onderbouwing:\nAlinea een.\n\nAlinea twee.\n  - ingesprongen\nTips: rustig");
        let section = SectionExtractor::new()
            .extract(&doc, &JUSTIFICATION, &[&*APPROACH_TIPS])
            .unwrap();
        assert_eq!(section, "Alinea een.\n\nAlinea twee.\n  - ingesprongen");
    }

    #[test]
    fn test_missing_and_empty_sections() {
        let doc = Document::new("Onderbouwing:\nTips: -");
        let extractor = SectionExtractor::new();
        assert_eq!(extractor.extract(&doc, &LEARNING_GOALS, &[]), None);
        assert_eq!(
            extractor.extract(&doc, &JUSTIFICATION, &[&*APPROACH_TIPS]),
            Some(String::new())
        );
    }

    #[test]
    fn test_truncation() {
        let text = format!("Onderbouwing:\n{}", "a".repeat(5000));
        let doc = Document::new(&text);
        let section = SectionExtractor::new().extract(&doc, &JUSTIFICATION, &[]).unwrap();
        assert_eq!(section.chars().count(), 3000);

        let section = SectionExtractor::new()
            .with_char_limit(10)
            .extract(&doc, &JUSTIFICATION, &[])
            .unwrap();
        assert_eq!(section, "aaaaaaaaaa");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("ëëëë", 2), "ëë");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_learning_goals_not_applicable() {
        assert_eq!(normalize_learning_goals("N.V.T.".to_string()), "N.v.t.");
        assert_eq!(
            normalize_learning_goals("voorlopig n.v.t., later bespreken".to_string()),
            "N.v.t."
        );
        assert_eq!(normalize_learning_goals("zien.N.V.Tx".to_string()), "N.v.t.");
        assert_eq!(
            normalize_learning_goals("samenwerken".to_string()),
            "samenwerken"
        );
    }
}
