//! Column type inference and header detection.

mod column;
mod header;
pub mod patterns;

pub use column::{ColumnInferer, InferenceConfig, InferredColumn, infer_column};
pub use header::{HeaderDecision, decide_header, default_title, should_skip_header_row};
