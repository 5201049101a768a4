//! In-process stores backed by insertion-ordered maps.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use super::{
    DatasetStore, MetadataStore, RetentionPolicy, SearchFilter, StoreError, StoreResult,
    stamp_new_dataset, stamp_new_metadata,
};
use crate::schema::{Dataset, Metadata};

fn read_lock<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
}

fn write_lock<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
}

/// Datasets kept in memory.
#[derive(Debug, Default)]
pub struct MemoryDatasetStore {
    datasets: RwLock<IndexMap<String, Dataset>>,
}

impl MemoryDatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored datasets.
    pub fn len(&self) -> usize {
        read_lock(&self.datasets).map_or(0, |map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DatasetStore for MemoryDatasetStore {
    fn create(&self, dataset: Dataset) -> StoreResult<Dataset> {
        let dataset = stamp_new_dataset(dataset, Utc::now());
        write_lock(&self.datasets)?.insert(dataset.id.clone(), dataset.clone());
        Ok(dataset)
    }

    fn read(&self, id: &str) -> StoreResult<Dataset> {
        read_lock(&self.datasets)?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update(&self, mut dataset: Dataset) -> StoreResult<Dataset> {
        let mut map = write_lock(&self.datasets)?;
        let slot = map
            .get_mut(&dataset.id)
            .ok_or_else(|| StoreError::NotFound(dataset.id.clone()))?;
        dataset.updated_time = Some(Utc::now());
        *slot = dataset.clone();
        Ok(dataset)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        write_lock(&self.datasets)?
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Metadata kept in memory.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    metadata: RwLock<IndexMap<String, Metadata>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert metadata as-is, keeping its id and timestamps.
    ///
    /// Useful for seeding a store with aged entries.
    pub fn insert(&self, metadata: Metadata) -> StoreResult<()> {
        write_lock(&self.metadata)?.insert(metadata.id.clone(), metadata);
        Ok(())
    }

    pub fn len(&self) -> usize {
        read_lock(&self.metadata).map_or(0, |map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataStore for MemoryMetadataStore {
    fn create(&self, metadata: Metadata) -> StoreResult<Metadata> {
        let metadata = stamp_new_metadata(metadata, Utc::now());
        write_lock(&self.metadata)?.insert(metadata.id.clone(), metadata.clone());
        Ok(metadata)
    }

    fn get_by_id(&self, id: &str) -> StoreResult<Metadata> {
        read_lock(&self.metadata)?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn get_list(&self, filter: &SearchFilter) -> StoreResult<Vec<Metadata>> {
        let map = read_lock(&self.metadata)?;
        Ok(filter.apply(map.values().cloned()))
    }

    fn get_expired(
        &self,
        policy: &RetentionPolicy,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Metadata>> {
        let map = read_lock(&self.metadata)?;
        Ok(map
            .values()
            .filter(|m| policy.is_expired(m, now))
            .cloned()
            .collect())
    }

    fn update(&self, mut metadata: Metadata) -> StoreResult<Metadata> {
        let mut map = write_lock(&self.metadata)?;
        let slot = map
            .get_mut(&metadata.id)
            .ok_or_else(|| StoreError::NotFound(metadata.id.clone()))?;
        metadata.updated_time = Some(Utc::now());
        *slot = metadata.clone();
        Ok(metadata)
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        write_lock(&self.metadata)?
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
