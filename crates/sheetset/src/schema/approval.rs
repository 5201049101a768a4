//! Approval model and the column reshape it drives.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::column::ColumnHeader;
use super::dataset::Dataset;

/// One column picked by the user during approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSelection {
    /// Current `index` of the column being selected.
    pub origin_index: usize,
    /// New display position.
    pub index: usize,
    /// New title.
    pub title: String,
    #[serde(default)]
    pub decimals: i8,
    #[serde(default)]
    pub is_output: bool,
}

impl HeaderSelection {
    pub fn new(origin_index: usize, index: usize, title: impl Into<String>) -> Self {
        Self {
            origin_index,
            index,
            title: title.into(),
            decimals: 0,
            is_output: false,
        }
    }

    pub fn with_decimals(mut self, decimals: i8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_output(mut self, is_output: bool) -> Self {
        self.is_output = is_output;
        self
    }
}

/// User-directed rename, subset, reorder and retitle of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalModel {
    /// New dataset name.
    pub name: String,
    /// Columns to keep.
    pub header: Vec<HeaderSelection>,
}

impl ApprovalModel {
    pub fn new(name: impl Into<String>, header: Vec<HeaderSelection>) -> Self {
        Self {
            name: name.into(),
            header,
        }
    }
}

impl Dataset {
    /// Apply an approval to header and body.
    ///
    /// Selections are ordered by their new `index` (stable). Each existing
    /// column is matched against the first selection whose `origin_index`
    /// equals the column's current `index`; unmatched columns are dropped and
    /// unmatched selections ignored. The column type and `origin_index` of a
    /// kept column never change, and its cells move with it.
    pub fn reshape(&mut self, model: &ApprovalModel) {
        self.name = model.name.clone();

        let mut selections: Vec<&HeaderSelection> = model.header.iter().collect();
        selections.sort_by_key(|s| s.index);

        // (selection rank, existing position)
        let mut kept: Vec<(usize, usize)> = self
            .header
            .iter()
            .enumerate()
            .filter_map(|(position, column)| {
                selections
                    .iter()
                    .position(|s| s.origin_index == column.index)
                    .map(|rank| (rank, position))
            })
            .collect();
        kept.sort_by_key(|&(rank, _)| rank);

        let header: Vec<ColumnHeader> = kept
            .iter()
            .map(|&(rank, position)| {
                let selection = selections[rank];
                let existing = &self.header[position];
                ColumnHeader {
                    title: selection.title.clone(),
                    origin_index: existing.origin_index,
                    index: selection.index,
                    col_type: existing.col_type,
                    decimals: selection.decimals,
                    is_output: selection.is_output,
                }
            })
            .collect();

        let body = self
            .body
            .iter()
            .map(|row| {
                kept.iter()
                    .map(|&(_, position)| {
                        row.get(position)
                            .cloned()
                            .unwrap_or_else(|| Cell::empty(self.header[position].col_type))
                    })
                    .collect()
            })
            .collect();

        self.header = header;
        self.body = body;
    }
}
