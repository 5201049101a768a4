//! Tabular sources: where raw string grids come from.
//!
//! A source id names a workbook-like container (a spreadsheet document, a
//! file or a directory). Each container holds sheets; only grid sheets carry
//! cell values, everything else (charts, binary files) is listed as
//! [`SheetKind::Other`] and skipped during ingestion.

mod csv_dir;
mod memory;
mod range;

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SourceType;

pub use csv_dir::CsvDirSource;
pub use memory::MemorySource;
pub use range::GridRange;

/// Error returned by tabular sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source id does not resolve to anything.
    #[error("source '{0}' not found")]
    NotFound(String),

    /// The source exists but has no sheet with this title.
    #[error("sheet '{sheet}' not found in source '{source_id}'")]
    SheetNotFound { source_id: String, sheet: String },

    /// Error reading source files.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited text could not be parsed.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A grid range string could not be parsed.
    #[error("invalid range '{0}'")]
    InvalidRange(String),

    /// The backend could not serve the call.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Kind of a sheet inside a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// Cells arranged in rows and columns.
    Grid,
    /// Anything without cell values.
    Other,
}

/// A sheet listed by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    pub title: String,
    pub kind: SheetKind,
}

impl SheetInfo {
    pub fn grid(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: SheetKind::Grid,
        }
    }

    pub fn other(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: SheetKind::Other,
        }
    }

    pub fn is_grid(&self) -> bool {
        self.kind == SheetKind::Grid
    }
}

/// Provider of raw string grids.
pub trait TabularSource: Send + Sync {
    /// How metadata built from this source is tagged.
    fn source_type(&self) -> SourceType;

    /// List the sheets of a source, in source order.
    fn sheets(&self, source_id: &str) -> SourceResult<Vec<SheetInfo>>;

    /// Read the cells of one sheet, row-major, restricted to `range`.
    ///
    /// Rows may be ragged.
    fn read_grid(
        &self,
        source_id: &str,
        sheet: &str,
        range: &GridRange,
    ) -> SourceResult<Vec<Vec<String>>>;
}
