//! Approval: reshape a temporary dataset and make it permanent.

use log::info;

use super::DatasetService;
use crate::error::{Result, SheetsetError};
use crate::schema::{ApprovalModel, Metadata};

impl DatasetService {
    /// Apply the user's column selection to the dataset behind `metadata_id`.
    ///
    /// The dataset is renamed and reshaped (see [`crate::Dataset::reshape`]),
    /// then its metadata is re-derived under the same id and marked
    /// permanent. The dataset is written before the metadata; a failed
    /// metadata write leaves the reshaped dataset in place.
    pub fn approve(&self, metadata_id: &str, model: &ApprovalModel) -> Result<Metadata> {
        if model.header.is_empty() {
            return Err(SheetsetError::validation("bad-model", "No entities selected"));
        }

        let (current, mut dataset) = self.metadata_and_dataset(metadata_id)?;

        dataset.reshape(model);
        dataset.metadata_id = Some(current.id.clone());

        let mut approved =
            Metadata::derive(&dataset, current.source_type, current.source_reference.clone());
        approved.id = current.id;
        approved.process_type = current.process_type;
        approved.created_time = current.created_time;
        approved.updated_time = current.updated_time;
        approved.last_sync_time = current.last_sync_time;
        approved.is_temporary = false;

        self.datasets
            .update(dataset)
            .map_err(|e| SheetsetError::persistence("dataset-write", "Can not save dataset", e))?;

        let approved = self.metadata.update(approved).map_err(|e| {
            SheetsetError::persistence("metadata-write", "Can not save dataset metadata", e)
        })?;

        info!(
            "approved metadata {} as '{}' with {} columns",
            approved.id,
            approved.name,
            approved.header.len()
        );
        Ok(approved)
    }
}
