//! Dataset and metadata stores.
//!
//! The service only talks to storage through [`DatasetStore`] and
//! [`MetadataStore`]. Two implementations ship with the crate:
//!
//! ```text
//! MemoryDatasetStore / MemoryMetadataStore   in-process, for tests and embedding
//! JsonDirStore                               <root>/dataset/<id>.json
//!                                            <root>/metadata/<id>.json
//! ```
//!
//! Stores assign ids and audit timestamps: `create` gives the entity a fresh
//! id and sets every timestamp to now, `update` refreshes `updated_time`.

mod filter;
mod json_dir;
mod memory;
mod retention;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::id::generate_id;
use crate::schema::{Dataset, Metadata};

pub use filter::{DEFAULT_LIMIT, OrderBy, SearchFilter, SearchQuery};
pub use json_dir::JsonDirStore;
pub use memory::{MemoryDatasetStore, MemoryMetadataStore};
pub use retention::RetentionPolicy;

/// Error returned by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entity with this id.
    #[error("entity '{0}' not found")]
    NotFound(String),

    /// Error reading or writing a store file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored entity could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused or could not serve the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage for full datasets.
pub trait DatasetStore: Send + Sync {
    /// Save a new dataset under a fresh id.
    fn create(&self, dataset: Dataset) -> StoreResult<Dataset>;

    /// Load a dataset by id.
    fn read(&self, id: &str) -> StoreResult<Dataset>;

    /// Replace an existing dataset.
    fn update(&self, dataset: Dataset) -> StoreResult<Dataset>;

    /// Remove a dataset.
    fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Storage for metadata previews.
pub trait MetadataStore: Send + Sync {
    /// Save new metadata under a fresh id.
    fn create(&self, metadata: Metadata) -> StoreResult<Metadata>;

    /// Load metadata by id.
    fn get_by_id(&self, id: &str) -> StoreResult<Metadata>;

    /// Query metadata.
    fn get_list(&self, filter: &SearchFilter) -> StoreResult<Vec<Metadata>>;

    /// Metadata that `policy` considers expired at `now`.
    fn get_expired(
        &self,
        policy: &RetentionPolicy,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Metadata>>;

    /// Replace existing metadata.
    fn update(&self, metadata: Metadata) -> StoreResult<Metadata>;

    /// Remove metadata.
    fn delete_by_id(&self, id: &str) -> StoreResult<()>;
}

pub(crate) fn stamp_new_dataset(mut dataset: Dataset, now: DateTime<Utc>) -> Dataset {
    dataset.id = generate_id();
    dataset.created_time = Some(now);
    dataset.updated_time = Some(now);
    dataset
}

pub(crate) fn stamp_new_metadata(mut metadata: Metadata, now: DateTime<Utc>) -> Metadata {
    metadata.id = generate_id();
    metadata.created_time = Some(now);
    metadata.updated_time = Some(now);
    metadata.last_sync_time = Some(now);
    metadata
}
