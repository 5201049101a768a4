//! Sheetset: column type inference and dataset reshaping for spreadsheet-shaped data.
//!
//! Sheetset reads raw string grids (one per sheet), decides a type for every
//! column, stores a full [`Dataset`] plus a lightweight [`Metadata`] preview,
//! and later lets a caller reshape (approve), paginate, list and archive what
//! was stored.
//!
//! # Core Principles
//!
//! - **Column-wide typing**: a column is either fully numeric or falls back to strings
//! - **Stable origins**: every column remembers where it sat in the ingested grid
//! - **Narrow collaborators**: storage and sources are plain traits
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use sheetset::source::MemorySource;
//! use sheetset::store::{MemoryDatasetStore, MemoryMetadataStore};
//! use sheetset::{DatasetService, SourceType};
//!
//! let source = MemorySource::new(SourceType::UploadedFile).with_sheet(
//!     "people",
//!     "Sheet1",
//!     vec![
//!         vec!["name".to_string(), "age".to_string()],
//!         vec!["Alice".to_string(), "30".to_string()],
//!     ],
//! );
//!
//! let service = DatasetService::new(
//!     Arc::new(MemoryDatasetStore::new()),
//!     Arc::new(MemoryMetadataStore::new()),
//!     Arc::new(source),
//! );
//!
//! let created = service.ingest("people").unwrap();
//! assert_eq!(created.len(), 1);
//! assert_eq!(created[0].size, 1);
//! ```

pub mod assembly;
pub mod config;
pub mod error;
pub mod inference;
pub mod schema;
pub mod service;
pub mod source;
pub mod store;

mod id;

pub use assembly::{assemble, build_dataset, columns_from_grid};
pub use config::{IngestConfig, SheetsetConfig};
pub use error::{Result, SheetsetError};
pub use id::generate_id;
pub use inference::{
    ColumnInferer, HeaderDecision, InferenceConfig, InferredColumn, decide_header, infer_column,
    should_skip_header_row,
};
pub use schema::{
    ApprovalModel, Cell, CellRead, ColumnHeader, ColumnType, Dataset, HeaderSelection,
    HeaderSummary, Metadata, NumberCell, ProcessType, SourceType, StringCell,
};
pub use service::{DatasetService, SweepReport, parse_page_param};
pub use source::{GridRange, SheetInfo, SheetKind, TabularSource};
pub use store::{DatasetStore, MetadataStore, RetentionPolicy, SearchFilter};

