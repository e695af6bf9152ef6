use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::trace;

// ── DateParser ────────────────────────────────────────────────────────────────

/// Parses transaction dates in the dataset's fixed month/day/year layout.
///
/// The layout is never auto-detected: `"01/02/2019"` is always January 2nd.
pub struct DateParser;

impl DateParser {
    /// The only accepted layout.
    pub const FORMAT: &'static str = "%m/%d/%Y";

    /// Parse `s` as `MM/DD/YYYY`, returning `None` for anything else
    /// (including impossible dates such as `"13/40/2019"` or `"02/30/2019"`).
    pub fn parse(s: &str) -> Option<NaiveDate> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(trimmed, Self::FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                trace!(value = trimmed, error = %e, "date rejected");
                None
            }
        }
    }
}

// ── DecimalParser ─────────────────────────────────────────────────────────────

/// `1.234,56`, `1234,56`, `-0,5`: comma decimal mark, optional dot grouping.
fn comma_decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d{1,3}(?:\.\d{3})+|\d+),\d+$").expect("regex is valid")
    })
}

/// `1.234`, `1234`, `-7`: whole numbers, dots only as thousands separators.
fn grouped_integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d{1,3}(?:\.\d{3})+|\d+)$").expect("regex is valid")
    })
}

/// Parses numeric columns written with European formatting.
///
/// The comma is always the decimal mark and the dot is always a thousands
/// separator, whether or not a comma is present.
pub struct DecimalParser;

impl DecimalParser {
    /// Parse a decimal value.
    ///
    /// * `"1.234,56"` → `1234.56`
    /// * `"548,9715"` → `548.9715`
    /// * `"1.234"` → `1234.0`
    ///
    /// Returns `None` for empty or non-numeric input, and for dots that are
    /// not in thousands-group positions (`"75.5"`).
    pub fn parse(s: &str) -> Option<f64> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }

        if !comma_decimal_pattern().is_match(trimmed) && !grouped_integer_pattern().is_match(trimmed) {
            trace!(value = trimmed, "number rejected");
            return None;
        }

        let normalised: String = trimmed
            .chars()
            .filter(|c| *c != '.')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        let value = normalised.parse::<f64>().ok()?;
        value.is_finite().then_some(value)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
