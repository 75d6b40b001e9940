//! Lexical format checkers applied to individual cell values.
//!
//! Each checker is a pure function from `(value, field name)` to an optional
//! issue string. Blank values always pass: an empty cell imports as NULL and
//! is never a lexical defect.

use std::sync::OnceLock;

use regex::Regex;

static DATE_PATTERN: OnceLock<Regex> = OnceLock::new();
static NUMERIC_PATTERN: OnceLock<Regex> = OnceLock::new();
static GROUPED_NUMERIC_PATTERN: OnceLock<Regex> = OnceLock::new();

fn date_pattern() -> &'static Regex {
    DATE_PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}( \d{2}:\d{2}:\d{2})?$").expect("valid date regex")
    })
}

fn numeric_pattern() -> &'static Regex {
    NUMERIC_PATTERN.get_or_init(|| Regex::new(r"^-?\d+\.?\d*%?$").expect("valid numeric regex"))
}

fn grouped_numeric_pattern() -> &'static Regex {
    GROUPED_NUMERIC_PATTERN.get_or_init(|| {
        Regex::new(r"^-?\d{1,3}(,\d{3})*(\.\d+)?%?$").expect("valid grouped numeric regex")
    })
}

/// Accepts `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS` only.
///
/// Digit grouping is all that is checked; `2024-13-40` passes. The import
/// target rejects out-of-range components on its own, with a clearer message
/// than a lexical pre-check could give.
pub fn check_date_format(value: &str, field: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if date_pattern().is_match(trimmed) {
        return None;
    }
    Some(format!(
        "date format will not import: {field}={value} (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)"
    ))
}

/// Accepts plain numerals (`-?digits[.digits][%]`) and comma-grouped
/// numerals (`1,234.56`).
///
/// Only comma-bearing values that fail the grouped pattern are flagged.
/// Comma-free values that fail the plain pattern pass through unflagged.
pub fn check_numeric_format(value: &str, field: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if numeric_pattern().is_match(trimmed) {
        return None;
    }
    if trimmed.contains(',') && !grouped_numeric_pattern().is_match(trimmed) {
        return Some(format!("numeric format looks malformed: {field}={value}"));
    }
    None
}

/// Flags values carrying characters the import path cannot take verbatim:
/// an embedded double quote in a value that does not itself start with one,
/// and any line break.
pub fn check_special_characters(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    if value.contains('"') && !value.starts_with('"') {
        return Some("contains an unescaped double quote".to_string());
    }
    if value.contains('\n') || value.contains('\r') {
        return Some("contains a line break (requires escaping)".to_string());
    }
    None
}
