//! Core type definitions for the dataset model.

use serde::{Deserialize, Serialize};

/// Inferred storage type for a column.
///
/// Every cell is a sequence, so both variants are array types: a plain
/// number column stores one-element number sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    /// Sequences of 64-bit floats.
    NumberArray,
    /// Sequences of strings.
    StringArray,
}

impl ColumnType {
    /// Returns true if this type holds numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::NumberArray)
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::NumberArray => "number[]",
            ColumnType::StringArray => "string[]",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::StringArray
    }
}

/// Where a dataset was ingested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// A worksheet inside a hosted spreadsheet document.
    GoogleWorksheet,
    /// A delimited file uploaded or read from disk.
    UploadedFile,
}

impl Default for SourceType {
    fn default() -> Self {
        SourceType::UploadedFile
    }
}

/// What a dataset is used for downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessType {
    Training,
    Validation,
    Prediction,
}

impl Default for ProcessType {
    fn default() -> Self {
        ProcessType::Training
    }
}
