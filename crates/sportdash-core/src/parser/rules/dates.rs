//! Date normalization for Dutch staff-written text.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patterns::{DATE_DMY, DATE_DUTCH_LONG, DATE_ISO, DATE_TOKEN, RANGE_SEPARATOR};

/// Outcome of normalizing a non-empty date string.
///
/// Serializes as a plain string: the ISO form for recognized dates, the
/// untouched input otherwise. Consumers must treat a non-ISO string as a
/// value that needs manual correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedDate {
    /// A recognized calendar date.
    Iso(NaiveDate),
    /// Text that could not be read as a date, kept as written.
    Unrecognized(String),
}

impl NormalizedDate {
    /// The calendar date, if one was recognized.
    pub fn as_iso(&self) -> Option<NaiveDate> {
        match self {
            Self::Iso(date) => Some(*date),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Iso(_))
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iso(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Normalize a date written as `DD-MM-YYYY`, `DD/MM/YYYY`, `D maand YYYY`
/// or `YYYY-MM-DD`.
///
/// Returns `None` for an empty value or the `-` placeholder. Only the
/// leading date is read; anything after it is ignored. Input that does not
/// start with a valid date comes back unchanged as
/// [`NormalizedDate::Unrecognized`].
pub fn normalize_date(input: &str) -> Option<NormalizedDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }

    let parsed = parse_dmy(trimmed)
        .or_else(|| parse_dutch_long(trimmed))
        .or_else(|| parse_iso(trimmed));

    Some(match parsed {
        Some(date) => NormalizedDate::Iso(date),
        None => NormalizedDate::Unrecognized(input.to_string()),
    })
}

/// Split a written date range into its start and end dates.
///
/// Date-shaped tokens are preferred; with fewer than two of them the text is
/// split on a range separator (`-`, `–`, `t/m`, `tot`) and each side is
/// normalized on its own.
pub fn split_date_range(text: &str) -> (Option<NormalizedDate>, Option<NormalizedDate>) {
    let tokens: Vec<&str> = DATE_TOKEN.find_iter(text).map(|m| m.as_str()).collect();
    if tokens.len() >= 2 {
        return (normalize_date(tokens[0]), normalize_date(tokens[1]));
    }

    let mut parts = RANGE_SEPARATOR.splitn(text.trim(), 2);
    let from = parts.next().and_then(normalize_date);
    let until = parts.next().and_then(normalize_date);
    (from, until)
}

fn parse_dmy(text: &str) -> Option<NaiveDate> {
    let caps = DATE_DMY.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_dutch_long(text: &str) -> Option<NaiveDate> {
    let caps = DATE_DUTCH_LONG.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = dutch_month_to_number(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_iso(text: &str) -> Option<NaiveDate> {
    let caps = DATE_ISO.captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn dutch_month_to_number(month: &str) -> Option<u32> {
    let number = match month.to_lowercase().as_str() {
        "jan" | "januari" => 1,
        "feb" | "februari" => 2,
        "mrt" | "maart" => 3,
        "apr" | "april" => 4,
        "mei" => 5,
        "jun" | "juni" => 6,
        "jul" | "juli" => 7,
        "aug" | "augustus" => 8,
        "sep" | "sept" | "september" => 9,
        "okt" | "oktober" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(number)
}
