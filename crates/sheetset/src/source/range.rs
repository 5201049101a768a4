//! A1-style grid ranges.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::SourceError;

static RANGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)([0-9]*):([A-Za-z]+)([0-9]*)$").unwrap());

/// Rectangular cell range such as `A:Z` or `B2:D10`.
///
/// Column and row bounds are zero-based and inclusive. Missing row numbers
/// leave the range open on that side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRange {
    pub first_column: usize,
    pub last_column: usize,
    pub first_row: usize,
    pub last_row: Option<usize>,
}

impl Default for GridRange {
    fn default() -> Self {
        Self {
            first_column: 0,
            last_column: 25,
            first_row: 0,
            last_row: None,
        }
    }
}

impl GridRange {
    /// Parse an A1-style range.
    pub fn parse(input: &str) -> Result<Self, SourceError> {
        let invalid = || SourceError::InvalidRange(input.to_string());
        let caps = RANGE_PATTERN.captures(input.trim()).ok_or_else(invalid)?;

        let first_column = column_index(&caps[1]).ok_or_else(invalid)?;
        let last_column = column_index(&caps[3]).ok_or_else(invalid)?;
        let first_row = row_index(&caps[2]).map_err(|_| invalid())?;
        let last_row = row_index(&caps[4]).map_err(|_| invalid())?;

        if last_column < first_column {
            return Err(invalid());
        }
        if let (Some(first), Some(last)) = (first_row, last_row) {
            if last < first {
                return Err(invalid());
            }
        }

        Ok(Self {
            first_column,
            last_column,
            first_row: first_row.unwrap_or(0),
            last_row,
        })
    }

    /// Number of columns covered.
    pub fn width(&self) -> usize {
        self.last_column - self.first_column + 1
    }

    /// Cut `grid` down to this range.
    pub fn apply(&self, grid: Vec<Vec<String>>) -> Vec<Vec<String>> {
        let take = self
            .last_row
            .map_or(usize::MAX, |last| (last + 1).saturating_sub(self.first_row));
        grid.into_iter()
            .skip(self.first_row)
            .take(take)
            .map(|row| {
                row.into_iter()
                    .skip(self.first_column)
                    .take(self.width())
                    .collect()
            })
            .collect()
    }
}

impl FromStr for GridRange {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridRange::parse(s)
    }
}

impl fmt::Display for GridRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first_row = match self.last_row {
            Some(_) => (self.first_row + 1).to_string(),
            None if self.first_row > 0 => (self.first_row + 1).to_string(),
            None => String::new(),
        };
        let last_row = self.last_row.map(|r| (r + 1).to_string()).unwrap_or_default();
        write!(
            f,
            "{}{}:{}{}",
            column_letters(self.first_column),
            first_row,
            column_letters(self.last_column),
            last_row
        )
    }
}

/// `A` is 0, `Z` is 25, `AA` is 26.
fn column_index(letters: &str) -> Option<usize> {
    letters
        .chars()
        .try_fold(0usize, |acc, c| {
            let digit = (c.to_ascii_uppercase() as usize).checked_sub('A' as usize)? + 1;
            acc.checked_mul(26)?.checked_add(digit)
        })
        .map(|n| n - 1)
}

fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Rows are 1-based in A1 notation; an empty string means unbounded.
fn row_index(digits: &str) -> Result<Option<usize>, ()> {
    if digits.is_empty() {
        return Ok(None);
    }
    match digits.parse::<usize>() {
        Ok(0) | Err(_) => Err(()),
        Ok(n) => Ok(Some(n - 1)),
    }
}
