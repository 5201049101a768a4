//! Removal of expired metadata and the datasets they point at.

use chrono::{DateTime, Utc};
use log::{error, info};
use serde::Serialize;

use super::DatasetService;

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Metadata ids removed together with their datasets.
    pub removed: Vec<String>,
    /// Metadata ids that could not be fully removed.
    pub failed: Vec<String>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl DatasetService {
    /// Delete everything the retention policy considers expired now.
    pub fn sweep_expired(&self) -> SweepReport {
        self.sweep_expired_at(Utc::now())
    }

    /// Delete everything the retention policy considers expired at `now`.
    ///
    /// Failures are logged and skipped; the sweep never aborts. When the
    /// metadata cannot be deleted, its dataset is left alone.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();

        let expired = match self.metadata.get_expired(&self.config.retention, now) {
            Ok(expired) => expired,
            Err(e) => {
                error!("Can not read expired metadata: {}", e);
                return report;
            }
        };

        for metadata in expired {
            if let Err(e) = self.metadata.delete_by_id(&metadata.id) {
                error!("Can not delete expired metadata {}: {}", metadata.id, e);
                report.failed.push(metadata.id);
                continue;
            }

            match self.datasets.delete(&metadata.dataset_reference) {
                Ok(()) => report.removed.push(metadata.id),
                Err(e) => {
                    error!(
                        "Can not delete expired dataset {}: {}",
                        metadata.dataset_reference, e
                    );
                    report.failed.push(metadata.id);
                }
            }
        }

        info!(
            "sweep removed {} entries, {} failed",
            report.removed.len(),
            report.failed.len()
        );
        report
    }
}
