//! Dataset, metadata and cell types.

mod approval;
mod cell;
mod column;
mod dataset;
mod metadata;
mod types;

pub use approval::{ApprovalModel, HeaderSelection};
pub use cell::{Cell, CellRead, NumberCell, StringCell, round_number};
pub use column::{ColumnHeader, HeaderSummary};
pub use dataset::{Dataset, page_bounds};
pub use metadata::{EXAMPLE_ROWS, Metadata};
pub use types::{ColumnType, ProcessType, SourceType};
