//! Header row detection.

use super::patterns::is_header_title;

/// Outcome of inspecting the first grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDecision {
    /// One title per column of the first row.
    pub titles: Vec<String>,
    /// Whether the first row is a header (and not data).
    pub skip_first_row: bool,
}

/// True iff the row is non-empty and every cell looks like a title.
///
/// The check is all-or-nothing over the whole row: one cell that fails it
/// makes the row data.
pub fn should_skip_header_row<S: AsRef<str>>(row: &[S]) -> bool {
    !row.is_empty() && row.iter().all(|cell| is_header_title(cell.as_ref()))
}

/// Default title of the column at zero-based `position`.
pub fn default_title(position: usize) -> String {
    format!("column-{}", position + 1)
}

/// Decide titles from the first grid row.
pub fn decide_header<S: AsRef<str>>(first_row: &[S]) -> HeaderDecision {
    let skip_first_row = should_skip_header_row(first_row);
    let titles = first_row
        .iter()
        .enumerate()
        .map(|(position, cell)| {
            if skip_first_row {
                cell.as_ref().to_string()
            } else {
                default_title(position)
            }
        })
        .collect();

    HeaderDecision {
        titles,
        skip_first_row,
    }
}
