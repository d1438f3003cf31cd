//! Free-text parsers for indications and session reports.

mod indication;
mod report;
pub mod request;
pub mod rules;

pub use indication::IndicationParser;
pub use report::ReportParser;
pub use request::ParseRequest;

use crate::models::{ParsedIndication, ParsedReport};

/// Trait for text parsers.
///
/// Parsing never fails: fields that cannot be found take their default
/// value, so callers always get a record back.
pub trait TextParser {
    /// Record produced for one submitted text.
    type Output;

    /// Parse one submitted text.
    fn parse(&self, text: &str) -> Self::Output;
}

/// Parse an indication with the default settings.
pub fn parse_indication_text(text: &str) -> ParsedIndication {
    IndicationParser::new().parse(text)
}

/// Parse a session report with the default settings.
pub fn parse_report_text(text: &str) -> ParsedReport {
    ReportParser::new().parse(text)
}
