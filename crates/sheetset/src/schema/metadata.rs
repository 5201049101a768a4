//! Metadata preview of a dataset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;

use super::cell::{Cell, retype_empty_cells};
use super::column::HeaderSummary;
use super::dataset::Dataset;
use super::types::{ProcessType, SourceType};

/// Number of body rows copied into a preview.
pub const EXAMPLE_ROWS: usize = 3;

/// Lightweight catalog record pointing at a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MetadataRecord")]
pub struct Metadata {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub header: Vec<HeaderSummary>,
    /// First rows of the dataset body.
    pub examples: Vec<Vec<Cell>>,
    /// Row count of the full dataset.
    pub size: usize,
    pub process_type: ProcessType,
    /// Id of the full dataset.
    pub dataset_reference: String,
    pub source_type: SourceType,
    /// Id of the tabular source the data was read from.
    pub source_reference: String,
    pub is_temporary: bool,
    pub is_archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct MetadataRecord {
    id: String,
    name: String,
    user_id: String,
    header: Vec<HeaderSummary>,
    examples: Vec<Vec<Cell>>,
    size: usize,
    #[serde(default)]
    process_type: ProcessType,
    dataset_reference: String,
    source_type: SourceType,
    source_reference: String,
    is_temporary: bool,
    is_archived: bool,
    #[serde(default)]
    created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_time: Option<DateTime<Utc>>,
    #[serde(default)]
    last_sync_time: Option<DateTime<Utc>>,
    #[serde(default)]
    archived_time: Option<DateTime<Utc>>,
}

impl From<MetadataRecord> for Metadata {
    fn from(record: MetadataRecord) -> Self {
        let mut examples = record.examples;
        let col_types: Vec<_> = record.header.iter().map(|h| h.col_type).collect();
        retype_empty_cells(&mut examples, &col_types);

        Self {
            id: record.id,
            name: record.name,
            user_id: record.user_id,
            header: record.header,
            examples,
            size: record.size,
            process_type: record.process_type,
            dataset_reference: record.dataset_reference,
            source_type: record.source_type,
            source_reference: record.source_reference,
            is_temporary: record.is_temporary,
            is_archived: record.is_archived,
            created_time: record.created_time,
            updated_time: record.updated_time,
            last_sync_time: record.last_sync_time,
            archived_time: record.archived_time,
        }
    }
}

impl Metadata {
    /// Build a fresh, temporary preview of `dataset`.
    ///
    /// The id is always new; timestamps are left for the store.
    pub fn derive(
        dataset: &Dataset,
        source_type: SourceType,
        source_reference: impl Into<String>,
    ) -> Self {
        let examples = dataset
            .body
            .iter()
            .take(EXAMPLE_ROWS)
            .cloned()
            .collect();

        Self {
            id: generate_id(),
            name: dataset.name.clone(),
            user_id: dataset.user_id.clone(),
            header: dataset.header.iter().map(HeaderSummary::from).collect(),
            examples,
            size: dataset.body.len(),
            process_type: ProcessType::Training,
            dataset_reference: dataset.id.clone(),
            source_type,
            source_reference: source_reference.into(),
            is_temporary: true,
            is_archived: false,
            created_time: None,
            updated_time: None,
            last_sync_time: None,
            archived_time: None,
        }
    }
}
