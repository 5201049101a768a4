//! Dataset service: the operations exposed to callers.
//!
//! The service owns no state of its own. It holds shared handles to a
//! [`DatasetStore`], a [`MetadataStore`] and a [`TabularSource`], plus an
//! immutable [`SheetsetConfig`].

mod approve;
mod sweep;

use std::sync::Arc;

use log::{debug, info, warn};

use crate::assembly::build_dataset;
use crate::config::SheetsetConfig;
use crate::error::{Result, SheetsetError};
use crate::schema::{Dataset, Metadata};
use crate::source::TabularSource;
use crate::store::{DatasetStore, MetadataStore, SearchFilter, SearchQuery};

pub use sweep::SweepReport;

/// Ingests, lists, reshapes and expires datasets.
pub struct DatasetService {
    datasets: Arc<dyn DatasetStore>,
    metadata: Arc<dyn MetadataStore>,
    source: Arc<dyn TabularSource>,
    config: SheetsetConfig,
}

impl DatasetService {
    /// Create a service with default configuration.
    pub fn new(
        datasets: Arc<dyn DatasetStore>,
        metadata: Arc<dyn MetadataStore>,
        source: Arc<dyn TabularSource>,
    ) -> Self {
        Self {
            datasets,
            metadata,
            source,
            config: SheetsetConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SheetsetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SheetsetConfig {
        &self.config
    }

    /// Read every grid sheet of `source_id` and store one dataset per sheet.
    ///
    /// Returns the created metadata, all temporary until approved. A source
    /// with no sheets yields an empty list. Any read or write failure aborts
    /// the call; datasets stored before the failure are left in place.
    pub fn ingest(&self, source_id: &str) -> Result<Vec<Metadata>> {
        let range = self.config.ingest.grid_range()?;

        let sheets = self.source.sheets(source_id).map_err(|e| {
            SheetsetError::upstream(
                "source-unavailable",
                format!("Can not read source '{}'", source_id),
                e,
            )
        })?;
        if sheets.is_empty() {
            info!("source '{}' has no sheets", source_id);
            return Ok(Vec::new());
        }

        let mut built = Vec::new();
        for sheet in &sheets {
            if !sheet.is_grid() {
                debug!("skipping non-grid sheet '{}'", sheet.title);
                continue;
            }

            let grid = self
                .source
                .read_grid(source_id, &sheet.title, &range)
                .map_err(|e| {
                    SheetsetError::upstream(
                        "source-unavailable",
                        format!("Can not read sheet '{}'", sheet.title),
                        e,
                    )
                })?;

            match build_dataset(
                &sheet.title,
                &self.config.ingest.user_id,
                &grid,
                &self.config.inference,
            ) {
                Some(dataset) => built.push(dataset),
                None => warn!("sheet '{}' has no values, skipping", sheet.title),
            }
        }

        if built.is_empty() {
            return Err(SheetsetError::validation("no-values", "No values found"));
        }

        let source_type = self.source.source_type();
        let mut created = Vec::with_capacity(built.len());
        for dataset in built {
            let dataset = self.datasets.create(dataset).map_err(|e| {
                SheetsetError::persistence("dataset-write", "Can not save dataset", e)
            })?;

            let metadata = Metadata::derive(&dataset, source_type, source_id);
            let metadata = self.metadata.create(metadata).map_err(|e| {
                SheetsetError::persistence("metadata-write", "Can not save dataset metadata", e)
            })?;

            info!(
                "ingested sheet '{}' as metadata {} ({} rows, {} columns)",
                dataset.name,
                metadata.id,
                metadata.size,
                metadata.header.len()
            );
            created.push(metadata);
        }

        Ok(created)
    }

    /// Approved, non-archived metadata, newest first.
    pub fn list(&self, start_after: Option<&str>, limit: i64) -> Result<Vec<Metadata>> {
        if limit < 1 {
            return Err(SheetsetError::validation(
                "bad-model",
                "Limit can not be less than 1",
            ));
        }

        let mut filter = SearchFilter::new()
            .with_limit(usize::try_from(limit).unwrap_or(usize::MAX))
            .with_query(SearchQuery::listed());
        if let Some(id) = start_after {
            filter = filter.with_start_after(id);
        }

        self.metadata.get_list(&filter).map_err(|e| {
            SheetsetError::upstream("store-unavailable", "Can not read metadata", e)
        })
    }

    /// Metadata preview by id.
    pub fn metadata(&self, metadata_id: &str) -> Result<Metadata> {
        self.metadata.get_by_id(metadata_id).map_err(|e| {
            if e.is_not_found() {
                SheetsetError::not_found("not-found", "Metadata not found")
            } else {
                SheetsetError::upstream("store-unavailable", "Can not read metadata", e)
            }
        })
    }

    /// One page of the dataset behind `metadata_id`.
    ///
    /// `skip` and `limit` are absolute row bounds, see [`Dataset::paginate`].
    pub fn read(&self, metadata_id: &str, skip: i64, limit: i64) -> Result<Dataset> {
        let (_, mut dataset) = self.metadata_and_dataset(metadata_id)?;
        dataset.paginate(skip, limit);
        Ok(dataset)
    }

    /// Mark metadata archived. Archived metadata drops out of listings and
    /// is swept once the archive retention has passed.
    pub fn archive(&self, metadata_id: &str) -> Result<Metadata> {
        let mut metadata = self.metadata(metadata_id)?;

        metadata.is_archived = true;
        metadata.archived_time = Some(chrono::Utc::now());

        let metadata = self.metadata.update(metadata).map_err(|e| {
            SheetsetError::persistence("metadata-archive-error", "Can not archive metadata", e)
        })?;
        info!("archived metadata {}", metadata.id);
        Ok(metadata)
    }

    fn metadata_and_dataset(&self, metadata_id: &str) -> Result<(Metadata, Dataset)> {
        let metadata = self.metadata(metadata_id)?;

        let dataset = self
            .datasets
            .read(&metadata.dataset_reference)
            .map_err(|e| {
                if e.is_not_found() {
                    SheetsetError::not_found("not-found", "Dataset not found")
                } else {
                    SheetsetError::upstream("store-unavailable", "Can not read dataset", e)
                }
            })?;

        Ok((metadata, dataset))
    }
}

/// Parse a `skip`/`limit` request parameter.
pub fn parse_page_param(name: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| SheetsetError::validation("bad-param", format!("Bad {} param", name)))
}
