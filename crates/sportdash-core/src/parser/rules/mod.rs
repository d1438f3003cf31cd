//! Rule-based field extractors for Dutch indication and report text.

pub mod dates;
pub mod flags;
pub mod patterns;
pub mod sections;

pub use dates::{normalize_date, split_date_range, NormalizedDate};
pub use flags::{detect_activity_flags, parse_tri_state};
pub use sections::{truncate_chars, SectionExtractor};

use std::collections::HashMap;
use std::hash::Hash;

use regex::Regex;
use tracing::trace;

use patterns::PLACEHOLDER;

/// Default maximum length of a line picked up by the lookahead fallback.
pub const DEFAULT_LOOKAHEAD_MAX_CHARS: usize = 50;

/// Input text split once into trimmed, non-empty lines.
///
/// Each line remembers where it starts in the original text, so callers can
/// go back to the unsplit text between two lines.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
    offsets: Vec<usize>,
}

impl<'a> Document<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut offsets = Vec::new();
        let mut position = 0;

        for raw in text.split_inclusive('\n') {
            let line = raw.trim();
            if !line.is_empty() {
                lines.push(line);
                offsets.push(position + raw.len() - raw.trim_start().len());
            }
            position += raw.len();
        }

        Self {
            text,
            lines,
            offsets,
        }
    }

    /// The original, unsplit text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Byte offset in [`Document::text`] where line `index` starts.
    pub fn line_start(&self, index: usize) -> usize {
        self.offsets.get(index).copied().unwrap_or(self.text.len())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// What to do when a label is found but its inline value is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Keep the inline value as is.
    None,
    /// Use the following line when it is short and not a labeled field.
    NextLine,
}

/// Descriptor for one labeled field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule<F> {
    /// Field the value is stored under.
    pub field: F,
    /// Line-anchored label pattern; group 1 holds the inline value.
    pub label: &'static Regex,
    pub fallback: Fallback,
}

impl<F> FieldRule<F> {
    pub fn new(field: F, label: &'static Regex, fallback: Fallback) -> Self {
        Self {
            field,
            label,
            fallback,
        }
    }
}

/// Where a field value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    Inline,
    NextLine,
}

/// A field value together with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    /// Trimmed value.
    pub value: String,
    /// Index of the label line in [`Document::lines`].
    pub line: usize,
    pub source: MatchSource,
}

impl FieldMatch {
    /// True when the value is empty or only layout punctuation.
    pub fn is_placeholder(&self) -> bool {
        is_placeholder(&self.value)
    }
}

/// True when `value` is empty or holds only `*`, `:`, `-` or `–`.
pub fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER.is_match(value)
}

/// Field values found by a [`FieldScanner`] pass.
#[derive(Debug, Clone)]
pub struct ExtractedFields<F> {
    matches: HashMap<F, FieldMatch>,
}

impl<F: Eq + Hash> ExtractedFields<F> {
    /// The match for `field`, placeholders included.
    pub fn raw(&self, field: F) -> Option<&FieldMatch> {
        self.matches.get(&field)
    }

    /// The value for `field`, unless it is missing or a placeholder.
    pub fn value(&self, field: F) -> Option<&str> {
        self.raw(field)
            .filter(|m| !m.is_placeholder())
            .map(|m| m.value.as_str())
    }

    /// The value for `field`, or `default` when missing or a placeholder.
    pub fn value_or(&self, field: F, default: &str) -> String {
        self.value(field).unwrap_or(default).to_string()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Scans a document for labeled fields.
#[derive(Debug, Clone)]
pub struct FieldScanner {
    lookahead_max_chars: usize,
}

impl FieldScanner {
    pub fn new() -> Self {
        Self {
            lookahead_max_chars: DEFAULT_LOOKAHEAD_MAX_CHARS,
        }
    }

    /// Set the length limit for lines taken by the lookahead fallback.
    pub fn with_lookahead_max_chars(mut self, max_chars: usize) -> Self {
        self.lookahead_max_chars = max_chars;
        self
    }

    /// Run every rule over the document.
    ///
    /// Rules are independent; each one keeps the first line its label
    /// matches.
    pub fn scan<F>(&self, doc: &Document<'_>, rules: &[FieldRule<F>]) -> ExtractedFields<F>
    where
        F: Copy + Eq + Hash,
    {
        let matches = rules
            .iter()
            .filter_map(|rule| self.extract(doc, rule).map(|m| (rule.field, m)))
            .collect();
        ExtractedFields { matches }
    }

    /// Extract a single field.
    pub fn extract<F>(&self, doc: &Document<'_>, rule: &FieldRule<F>) -> Option<FieldMatch> {
        let lines = doc.lines();
        let (index, inline) = lines.iter().enumerate().find_map(|(i, line)| {
            rule.label
                .captures(line)
                .map(|caps| (i, caps.get(1).map_or("", |m| m.as_str()).trim()))
        })?;

        if rule.fallback == Fallback::NextLine && is_placeholder(inline) {
            if let Some(next) = lines.get(index + 1) {
                if !next.contains(':') && next.chars().count() < self.lookahead_max_chars {
                    trace!(line = index, "using next line as field value");
                    return Some(FieldMatch {
                        value: next.trim().to_string(),
                        line: index,
                        source: MatchSource::NextLine,
                    });
                }
            }
        }

        Some(FieldMatch {
            value: inline.to_string(),
            line: index,
            source: MatchSource::Inline,
        })
    }
}

impl Default for FieldScanner {
    fn default() -> Self {
        Self::new()
    }
}
