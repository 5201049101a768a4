//! Service configuration.
//!
//! Every section has working defaults, so an empty JSON object is a valid
//! configuration file:
//!
//! ```json
//! {
//!   "inference": { "strict_numbers": false },
//!   "ingest": { "range": "A:Z", "user_id": "USER_ID" },
//!   "retention": { "temporary_ttl_minutes": 30, "archived_ttl_months": 1 }
//! }
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetsetError};
use crate::inference::InferenceConfig;
use crate::source::GridRange;
use crate::store::RetentionPolicy;

/// Default cell range read from every sheet.
pub const DEFAULT_RANGE: &str = "A:Z";

/// Owner recorded on ingested datasets.
pub const DEFAULT_USER_ID: &str = "USER_ID";

/// Settings for reading sheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// A1-style range read from every grid sheet.
    pub range: String,
    /// Owner recorded on ingested datasets and metadata.
    pub user_id: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            range: DEFAULT_RANGE.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl IngestConfig {
    /// Parse the configured range.
    pub fn grid_range(&self) -> Result<GridRange> {
        GridRange::parse(&self.range)
            .map_err(|e| SheetsetError::Config(format!("ingest.range: {}", e)))
    }
}

/// Top-level configuration of a [`crate::DatasetService`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsetConfig {
    pub inference: InferenceConfig,
    pub ingest: IngestConfig,
    pub retention: RetentionPolicy,
}

impl SheetsetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inference(mut self, inference: InferenceConfig) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_ingest(mut self, ingest: IngestConfig) -> Self {
        self.ingest = ingest;
        self
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SheetsetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: SheetsetConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| SheetsetError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| SheetsetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        self.ingest.grid_range()?;
        if self.retention.temporary_ttl_minutes < 0 {
            return Err(SheetsetError::Config(
                "retention.temporary_ttl_minutes must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
