//! Per-cell cleaning rules.
//!
//! Each rule is a pure function of one cell. Missing cells stay missing
//! under every rule.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Cell;

/// Area code, exchange and subscriber number, optionally parenthesized and
/// separated by `.` or `-`.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(?\b(\d{3})\)?[.-]?(\d{3})[.-](\d{4})\b").expect("phone pattern is valid")
});

const PHONE_CANONICAL: &str = "(${1})${2}-${3}";

/// Cell-level operations used by the pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRule {
    /// Convert to uppercase
    Uppercase,

    /// Convert to lowercase
    Lowercase,

    /// Rewrite phone numbers to `(AAA)EEE-SSSS`
    FormatPhone,

    /// Keep the first whitespace-delimited token
    FirstToken,

    /// Keep the last whitespace-delimited token
    LastToken,
}

impl CellRule {
    /// Apply this rule to a cell
    pub fn apply(&self, cell: &Cell) -> Cell {
        let value = cell.as_deref()?;
        match self {
            CellRule::Uppercase => Some(value.to_uppercase()),
            CellRule::Lowercase => Some(value.to_lowercase()),
            CellRule::FormatPhone => Some(format_phone(value)),
            CellRule::FirstToken => value.split_whitespace().next().map(str::to_string),
            CellRule::LastToken => value.split_whitespace().next_back().map(str::to_string),
        }
    }
}

/// Normalize a raw header: lowercase, then `/`, `-` and space become `_`.
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .replace(['/', '-', ' '], "_")
}

/// Rewrite every phone number found in `value` to the canonical form.
///
/// Text without a match is returned unchanged.
pub fn format_phone(value: &str) -> String {
    PHONE_PATTERN.replace_all(value, PHONE_CANONICAL).into_owned()
}

/// First and last whitespace-delimited tokens of a full name.
///
/// A single token is both first and last name.
pub fn split_name(full_name: &Cell) -> (Cell, Cell) {
    (
        CellRule::FirstToken.apply(full_name),
        CellRule::LastToken.apply(full_name),
    )
}
