//! File-backed store: one pretty-printed JSON file per entity.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{
    DatasetStore, MetadataStore, RetentionPolicy, SearchFilter, StoreError, StoreResult,
    stamp_new_dataset, stamp_new_metadata,
};
use crate::id::is_safe_id;
use crate::schema::{Dataset, Metadata};

const DATASET_DIR: &str = "dataset";
const METADATA_DIR: &str = "metadata";

/// Stores datasets and metadata as JSON files under a root directory.
///
/// ```text
/// <root>/
/// ├── dataset/<id>.json
/// └── metadata/<id>.json
/// ```
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open a store rooted at `root`. Directories are created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entity_path(&self, kind: &str, id: &str) -> StoreResult<PathBuf> {
        if !is_safe_id(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(self.root.join(kind).join(format!("{}.json", id)))
    }

    fn write<T: Serialize>(&self, path: &Path, value: &T) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), value)?;
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, path: &Path, id: &str) -> StoreResult<T> {
        let file = File::open(path).map_err(|e| not_found_or_io(e, path, id))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn remove(&self, path: &Path, id: &str) -> StoreResult<()> {
        fs::remove_file(path).map_err(|e| not_found_or_io(e, path, id))
    }

    fn ensure_exists(&self, path: &Path, id: &str) -> StoreResult<()> {
        if path.is_file() {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    fn all_metadata(&self) -> StoreResult<Vec<Metadata>> {
        let dir = self.root.join(METADATA_DIR);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|e| StoreError::Io {
            path: dir.clone(),
            source: e,
        })?;

        let mut items = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| StoreError::Io {
                    path: dir.clone(),
                    source: e,
                })?
                .path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let id = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                items.push(self.load(&path, &id)?);
            }
        }
        Ok(items)
    }
}

fn not_found_or_io(err: io::Error, path: &Path, id: &str) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(id.to_string())
    } else {
        StoreError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

impl DatasetStore for JsonDirStore {
    fn create(&self, dataset: Dataset) -> StoreResult<Dataset> {
        let dataset = stamp_new_dataset(dataset, Utc::now());
        let path = self.entity_path(DATASET_DIR, &dataset.id)?;
        self.write(&path, &dataset)?;
        Ok(dataset)
    }

    fn read(&self, id: &str) -> StoreResult<Dataset> {
        let path = self.entity_path(DATASET_DIR, id)?;
        self.load(&path, id)
    }

    fn update(&self, mut dataset: Dataset) -> StoreResult<Dataset> {
        let path = self.entity_path(DATASET_DIR, &dataset.id)?;
        self.ensure_exists(&path, &dataset.id)?;
        dataset.updated_time = Some(Utc::now());
        self.write(&path, &dataset)?;
        Ok(dataset)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let path = self.entity_path(DATASET_DIR, id)?;
        self.remove(&path, id)
    }
}

impl MetadataStore for JsonDirStore {
    fn create(&self, metadata: Metadata) -> StoreResult<Metadata> {
        let metadata = stamp_new_metadata(metadata, Utc::now());
        let path = self.entity_path(METADATA_DIR, &metadata.id)?;
        self.write(&path, &metadata)?;
        Ok(metadata)
    }

    fn get_by_id(&self, id: &str) -> StoreResult<Metadata> {
        let path = self.entity_path(METADATA_DIR, id)?;
        self.load(&path, id)
    }

    fn get_list(&self, filter: &SearchFilter) -> StoreResult<Vec<Metadata>> {
        Ok(filter.apply(self.all_metadata()?))
    }

    fn get_expired(
        &self,
        policy: &RetentionPolicy,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Metadata>> {
        Ok(self
            .all_metadata()?
            .into_iter()
            .filter(|m| policy.is_expired(m, now))
            .collect())
    }

    fn update(&self, mut metadata: Metadata) -> StoreResult<Metadata> {
        let path = self.entity_path(METADATA_DIR, &metadata.id)?;
        self.ensure_exists(&path, &metadata.id)?;
        metadata.updated_time = Some(Utc::now());
        self.write(&path, &metadata)?;
        Ok(metadata)
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let path = self.entity_path(METADATA_DIR, id)?;
        self.remove(&path, id)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::assembly::build_dataset;
    use crate::inference::InferenceConfig;
    use crate::schema::{Cell, ColumnHeader, ColumnType, SourceType};

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn dataset() -> Dataset {
        Dataset::new(
            "people",
            "USER_ID",
            vec![
                ColumnHeader::new("name", 0, ColumnType::StringArray),
                ColumnHeader::new("age", 1, ColumnType::NumberArray),
            ],
            vec![vec![
                Cell::strings(vec!["Alice".to_string()]),
                Cell::numbers(vec![30.0]),
            ]],
        )
    }

    #[test]
    fn test_dataset_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::new(dir.path());

        let created = DatasetStore::create(&store, dataset()).unwrap();
        let path = dir
            .path()
            .join("dataset")
            .join(format!("{}.json", created.id));
        assert!(path.exists());

        let loaded = store.read(&created.id).unwrap();
        assert_eq!(loaded, created);

        store.delete(&created.id).unwrap();
        assert!(store.read(&created.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_metadata_list_and_update() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::new(dir.path());

        let ds = DatasetStore::create(&store, dataset()).unwrap();
        let mut metadata = MetadataStore::create(
            &store,
            Metadata::derive(&ds, SourceType::UploadedFile, "people.csv"),
        )
        .unwrap();

        assert!(store.get_list(&SearchFilter::new()).unwrap().len() == 1);

        metadata.is_temporary = false;
        MetadataStore::update(&store, metadata.clone()).unwrap();
        let loaded = store.get_by_id(&metadata.id).unwrap();
        assert!(!loaded.is_temporary);
    }

    #[test]
    fn test_missing_and_unsafe_ids() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::new(dir.path());

        assert!(store.get_by_id("nope").unwrap_err().is_not_found());
        assert!(store.read("../escape").unwrap_err().is_not_found());
        assert!(store.get_list(&SearchFilter::new()).unwrap().is_empty());

        let mut ds = dataset();
        ds.id = "absent".to_string();
        assert!(DatasetStore::update(&store, ds).unwrap_err().is_not_found());
    }

    #[test]
    fn test_non_finite_input_stays_readable() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::new(dir.path());

        let grid = grid(&[&["v"], &["[1, inf]"], &["[2, NaN]"]]);
        let dataset = build_dataset("odd", "USER_ID", &grid, &InferenceConfig::default()).unwrap();
        let created = DatasetStore::create(&store, dataset).unwrap();

        let loaded = store.read(&created.id).unwrap();
        assert_eq!(loaded.body[0][0], Cell::numbers(vec![1.0, 0.0]));
        assert_eq!(loaded.body[1][0], Cell::numbers(vec![2.0, 0.0]));
    }

    #[test]
    fn test_ragged_string_padding_keeps_type() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::new(dir.path());

        let grid = grid(&[&["n", "name"], &["1", "a"], &["2"]]);
        let dataset = build_dataset("ragged", "USER_ID", &grid, &InferenceConfig::default()).unwrap();
        assert_eq!(dataset.body[1][1], Cell::empty(ColumnType::StringArray));

        let created = DatasetStore::create(&store, dataset).unwrap();
        let loaded = store.read(&created.id).unwrap();
        assert_eq!(loaded.body[1][1], Cell::empty(ColumnType::StringArray));
        assert_eq!(loaded, created);

        let metadata = MetadataStore::create(
            &store,
            Metadata::derive(&created, SourceType::UploadedFile, "ragged.csv"),
        )
        .unwrap();
        let loaded = store.get_by_id(&metadata.id).unwrap();
        assert_eq!(loaded.examples[1][1].col_type(), ColumnType::StringArray);
    }
}
