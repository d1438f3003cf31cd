//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SportdashError};
use crate::models::report::{DEFAULT_REVIEW_THRESHOLD, PARSED_BY_REGEX};
use crate::parser::rules::{sections::DEFAULT_SECTION_CHAR_LIMIT, DEFAULT_LOOKAHEAD_MAX_CHARS};

/// Main configuration for sportdash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SportdashConfig {
    /// Field and section extraction.
    pub extraction: ExtractionConfig,

    /// Session report scoring.
    pub report: ReportConfig,
}

/// Field and section extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum characters kept from a multi-line section.
    pub section_char_limit: usize,

    /// Lines at least this long are never taken as a field value by the
    /// next-line fallback.
    pub lookahead_max_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            section_char_limit: DEFAULT_SECTION_CHAR_LIMIT,
            lookahead_max_chars: DEFAULT_LOOKAHEAD_MAX_CHARS,
        }
    }
}

/// Session report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Reports scoring below this are flagged for review (0.0 - 1.0).
    pub review_threshold: f32,

    /// Value recorded as the parsing path.
    pub parsed_by: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
            parsed_by: PARSED_BY_REGEX.to_string(),
        }
    }
}

impl SportdashConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the parsers cannot work with.
    pub fn check(&self) -> Result<()> {
        if self.extraction.section_char_limit == 0 {
            return Err(SportdashError::Config(
                "extraction.section_char_limit must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.report.review_threshold) {
            return Err(SportdashError::Config(format!(
                "report.review_threshold must be between 0 and 1, got {}",
                self.report.review_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = SportdashConfig::default();
        assert_eq!(config.extraction.section_char_limit, 3000);
        assert_eq!(config.extraction.lookahead_max_chars, 50);
        assert_eq!(config.report.review_threshold, 0.7);
        assert_eq!(config.report.parsed_by, "regex");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SportdashConfig =
            serde_json::from_str(r#"{"report": {"review_threshold": 0.5}}"#).unwrap();
        assert_eq!(config.report.review_threshold, 0.5);
        assert_eq!(config.report.parsed_by, "regex");
        assert_eq!(config.extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_check_rejects_bad_values() {
        let mut config = SportdashConfig::default();
        config.report.review_threshold = 1.5;
        assert!(matches!(config.check(), Err(SportdashError::Config(_))));

        let mut config = SportdashConfig::default();
        config.extraction.section_char_limit = 0;
        assert!(config.check().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SportdashConfig::default();
        config.extraction.lookahead_max_chars = 80;
        config.save(&path).unwrap();

        assert_eq!(SportdashConfig::from_file(&path).unwrap(), config);
    }
}
