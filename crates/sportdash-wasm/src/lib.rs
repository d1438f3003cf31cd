//! WASM bindings for SportDash text extraction.
//!
//! This crate exposes the indication and session report parsers to the
//! browser form that lets staff paste text and review the extracted fields.

use chrono::DateTime;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use sportdash_core::{
    normalize_date as normalize, IndicationParser, ParseRequest, ReportParser, SportdashConfig,
    TextParser,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert a record to a plain JS object, with `null` for absent values.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse pasted indication text into form fields.
#[wasm_bindgen]
pub fn parse_indication_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&sportdash_core::parse_indication_text(text))
}

/// Parse a session report, stamped with the current time.
#[wasm_bindgen]
pub fn parse_report_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&sportdash_core::parse_report_text(text))
}

/// Parse a session report, stamped with `parsed_at_ms` (milliseconds since
/// the Unix epoch, as returned by `Date.now()`).
#[wasm_bindgen]
pub fn parse_report_text_at(text: &str, parsed_at_ms: f64) -> Result<JsValue, JsValue> {
    let parsed_at = DateTime::from_timestamp_millis(parsed_at_ms as i64)
        .ok_or_else(|| JsValue::from_str("timestamp out of range"))?;
    to_js(&ReportParser::new().parse_at(text, parsed_at))
}

/// Normalize a written date to `YYYY-MM-DD`.
///
/// Returns `undefined` for an empty value or `-`, and the input unchanged
/// when it is not a recognized date.
#[wasm_bindgen]
pub fn normalize_date(input: &str) -> Option<String> {
    normalize(input).map(|date| date.to_string())
}

/// Take the text out of a `{"text": "..."}` request body.
///
/// Rejected bodies throw a message carrying the HTTP status to answer with.
#[wasm_bindgen]
pub fn parse_request_body(body: &str) -> Result<String, JsValue> {
    ParseRequest::from_json(body)
        .map_err(|e| JsValue::from_str(&format!("{} (status {})", e, e.status_code())))
}

/// Indication extractor class for browser use.
#[wasm_bindgen]
pub struct IndicationExtractor {
    parser: IndicationParser,
}

#[wasm_bindgen]
impl IndicationExtractor {
    /// Create a new indication extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: IndicationParser::new(),
        }
    }

    /// Create an extractor from a JSON configuration document.
    #[wasm_bindgen]
    pub fn from_config(config_json: &str) -> Result<IndicationExtractor, JsValue> {
        let config = parse_config(config_json)?;
        Ok(Self {
            parser: IndicationParser::from_config(&config.extraction),
        })
    }

    /// Set the maximum length of the free-text sections.
    #[wasm_bindgen]
    pub fn set_section_char_limit(&mut self, limit: usize) {
        self.parser = self.parser.clone().with_section_char_limit(limit);
    }

    /// Set the length limit for values taken from the next line.
    #[wasm_bindgen]
    pub fn set_lookahead_max_chars(&mut self, max_chars: usize) {
        self.parser = self.parser.clone().with_lookahead_max_chars(max_chars);
    }

    /// Extract indication fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Extract fields together with notes for the reviewer.
    #[wasm_bindgen]
    pub fn extract_with_notes(&self, text: &str) -> Result<JsValue, JsValue> {
        let record = self.parser.parse(text);

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExtractResult {
            record: sportdash_core::ParsedIndication,
            review_notes: Vec<String>,
        }

        let output = ExtractResult {
            review_notes: record.review_notes(),
            record,
        };

        to_js(&output)
    }
}

impl Default for IndicationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Session report extractor class for browser use.
#[wasm_bindgen]
pub struct ReportExtractor {
    parser: ReportParser,
    review_threshold: f32,
}

#[wasm_bindgen]
impl ReportExtractor {
    /// Create a new report extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = SportdashConfig::default();
        Self {
            parser: ReportParser::new(),
            review_threshold: config.report.review_threshold,
        }
    }

    /// Create an extractor from a JSON configuration document.
    #[wasm_bindgen]
    pub fn from_config(config_json: &str) -> Result<ReportExtractor, JsValue> {
        let config = parse_config(config_json)?;
        Ok(Self {
            parser: ReportParser::from_config(&config),
            review_threshold: config.report.review_threshold,
        })
    }

    /// Score below which a report should be reviewed.
    #[wasm_bindgen(getter)]
    pub fn review_threshold(&self) -> f32 {
        self.review_threshold
    }

    /// Extract report fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Whether the report in `text` scores below the review threshold.
    #[wasm_bindgen]
    pub fn needs_review(&self, text: &str) -> bool {
        self.parser.parse(text).needs_review(self.review_threshold)
    }
}

impl Default for ReportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_config(config_json: &str) -> Result<SportdashConfig, JsValue> {
    let value = js_sys::JSON::parse(config_json)?;
    let config: SportdashConfig =
        serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    config
        .check()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}
