//! Core library for SportDash text extraction.
//!
//! This crate provides:
//! - Indication parsing (subject, group, activity flags, validity period, free-text sections)
//! - Session report parsing with a confidence score
//! - Dutch date normalization to ISO dates
//! - Request body handling for parse endpoints

pub mod error;
pub mod models;
pub mod parser;

pub use error::{RequestError, Result, SportdashError};
pub use models::{
    ActivityFlag, ExtractionConfig, Incident, ParsedIndication, ParsedReport, ReportConfig,
    SportdashConfig,
};
pub use parser::rules::{normalize_date, split_date_range, NormalizedDate};
pub use parser::{
    parse_indication_text, parse_report_text, IndicationParser, ParseRequest, ReportParser,
    TextParser,
};
