//! Cell text predicates used by column and header inference.

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Compiled once on first use.

static BRACKETED_NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[[0-9].*\]$").unwrap());

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[.*\]$").unwrap());

// Matches the empty string too.
static PLAIN_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9.,-]*$").unwrap());

static HEADER_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_ ]*$").unwrap());

/// Characters stripped from both ends of a bracketed list before splitting.
pub const ARRAY_TRIM_CHARS: &[char] = &[' ', '_', '!', '[', ']'];

/// A bracketed list whose first element starts with a digit, e.g. `[1, 2.5]`.
pub fn is_bracketed_numbers(value: &str) -> bool {
    BRACKETED_NUMBERS.is_match(value)
}

/// Any bracketed content, e.g. `[a, b]` or `[]`.
pub fn is_bracketed(value: &str) -> bool {
    BRACKETED.is_match(value)
}

/// Only digits, `.`, `,` and `-`.
pub fn is_plain_number(value: &str) -> bool {
    PLAIN_NUMBER.is_match(value)
}

/// Only ASCII letters, digits, `_` and spaces.
pub fn is_header_title(value: &str) -> bool {
    HEADER_TITLE.is_match(value)
}

/// Split a bracketed list into its raw pieces.
pub fn split_array(value: &str) -> Vec<&str> {
    value.trim_matches(ARRAY_TRIM_CHARS).split(',').collect()
}

/// Parse one numeric piece, ignoring surrounding whitespace.
///
/// Only finite values count: `inf`, `NaN` and overflowing literals such as
/// `1e999` are parse failures, since JSON has no way to store them.
pub fn parse_number(piece: &str) -> Option<f64> {
    piece
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
