//! Full dataset entity.

use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cell::{Cell, retype_empty_cells};
use super::column::ColumnHeader;

/// A full table: header plus row-major body.
///
/// `body[r][c]` belongs to `header[c]` by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DatasetRecord")]
pub struct Dataset {
    /// Assigned by the dataset store on create.
    pub id: String,
    pub name: String,
    /// Set once the dataset is approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_id: Option<String>,
    pub user_id: String,
    pub header: Vec<ColumnHeader>,
    pub body: Vec<Vec<Cell>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// Wire form of [`Dataset`], before empty cells are re-typed.
#[derive(Deserialize)]
struct DatasetRecord {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    metadata_id: Option<String>,
    user_id: String,
    header: Vec<ColumnHeader>,
    body: Vec<Vec<Cell>>,
    #[serde(default)]
    created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_time: Option<DateTime<Utc>>,
}

impl From<DatasetRecord> for Dataset {
    fn from(record: DatasetRecord) -> Self {
        let mut body = record.body;
        let col_types: Vec<_> = record.header.iter().map(|h| h.col_type).collect();
        retype_empty_cells(&mut body, &col_types);

        Self {
            id: record.id,
            name: record.name,
            metadata_id: record.metadata_id,
            user_id: record.user_id,
            header: record.header,
            body,
            created_time: record.created_time,
            updated_time: record.updated_time,
        }
    }
}

impl Dataset {
    /// Create an unsaved dataset.
    pub fn new(
        name: impl Into<String>,
        user_id: impl Into<String>,
        header: Vec<ColumnHeader>,
        body: Vec<Vec<Cell>>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            metadata_id: None,
            user_id: user_id.into(),
            header,
            body,
            created_time: None,
            updated_time: None,
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.body.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.body.get(row).and_then(|r| r.get(col))
    }

    /// Keep only the rows of one page.
    ///
    /// `skip` and `limit` are absolute row bounds, clamped independently to
    /// `[0, row_count]`. A limit below skip keeps nothing.
    pub fn paginate(&mut self, skip: i64, limit: i64) {
        let range = page_bounds(self.body.len(), skip, limit);
        self.body = self.body.drain(range).collect();
    }
}

/// Row range for a page request. See [`Dataset::paginate`].
pub fn page_bounds(len: usize, skip: i64, limit: i64) -> Range<usize> {
    let clamp = |value: i64| usize::try_from(value.max(0)).unwrap_or(usize::MAX).min(len);
    let start = clamp(skip);
    let end = clamp(limit);
    if end < start { start..start } else { start..end }
}
