//! Column headers.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Header of one dataset column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeader {
    /// Display title.
    pub title: String,
    /// Position in the originally ingested grid. Never changes.
    pub origin_index: usize,
    /// Current display position.
    pub index: usize,
    /// Storage type of every cell in the column.
    pub col_type: ColumnType,
    /// Decimal places used when reading numbers.
    #[serde(default)]
    pub decimals: i8,
    /// Whether the column is a model output.
    #[serde(default)]
    pub is_output: bool,
}

impl ColumnHeader {
    /// Create a header for a freshly ingested column.
    pub fn new(title: impl Into<String>, position: usize, col_type: ColumnType) -> Self {
        Self {
            title: title.into(),
            origin_index: position,
            index: position,
            col_type,
            decimals: 0,
            is_output: false,
        }
    }
}

/// Header entry of a metadata preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSummary {
    pub title: String,
    pub index: usize,
    pub origin_index: usize,
    pub col_type: ColumnType,
    #[serde(default)]
    pub decimals: i8,
    #[serde(default)]
    pub is_output: bool,
}

impl From<&ColumnHeader> for HeaderSummary {
    fn from(header: &ColumnHeader) -> Self {
        Self {
            title: header.title.clone(),
            index: header.index,
            origin_index: header.origin_index,
            col_type: header.col_type,
            decimals: header.decimals,
            is_output: header.is_output,
        }
    }
}
