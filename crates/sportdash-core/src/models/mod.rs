//! Records produced by the parsers and their configuration.

pub mod config;
pub mod indication;
pub mod report;

pub use config::{ExtractionConfig, ReportConfig, SportdashConfig};
pub use indication::{ActivityFlag, ParsedIndication};
pub use report::{Incident, ParsedReport};
