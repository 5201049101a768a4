//! Error types for the sheetset library.

use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceError;
use crate::store::StoreError;

/// Main error type for sheetset operations.
///
/// Every variant carries a stable, machine-readable reason (see
/// [`SheetsetError::reason`]) next to its human-readable message.
#[derive(Debug, Error)]
pub enum SheetsetError {
    /// Bad caller input (empty selection, malformed pagination parameter).
    #[error("{message}")]
    Validation {
        reason: &'static str,
        message: String,
    },

    /// Metadata or dataset absent.
    #[error("{message}")]
    NotFound {
        reason: &'static str,
        message: String,
    },

    /// The tabular source or a store read failed.
    #[error("{message}: {source}")]
    UpstreamUnavailable {
        reason: &'static str,
        message: String,
        #[source]
        source: Upstream,
    },

    /// A write to a store failed.
    #[error("{message}: {source}")]
    Persistence {
        reason: &'static str,
        message: String,
        #[source]
        source: StoreError,
    },

    /// Error reading or writing a local file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// The collaborator behind an [`SheetsetError::UpstreamUnavailable`].
#[derive(Debug, Error)]
pub enum Upstream {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SheetsetError {
    pub fn validation(reason: &'static str, message: impl Into<String>) -> Self {
        SheetsetError::Validation {
            reason,
            message: message.into(),
        }
    }

    pub fn not_found(reason: &'static str, message: impl Into<String>) -> Self {
        SheetsetError::NotFound {
            reason,
            message: message.into(),
        }
    }

    pub fn upstream(
        reason: &'static str,
        message: impl Into<String>,
        source: impl Into<Upstream>,
    ) -> Self {
        SheetsetError::UpstreamUnavailable {
            reason,
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn persistence(reason: &'static str, message: impl Into<String>, source: StoreError) -> Self {
        SheetsetError::Persistence {
            reason,
            message: message.into(),
            source,
        }
    }

    /// Stable reason string for API layers and logs.
    pub fn reason(&self) -> &str {
        match self {
            SheetsetError::Validation { reason, .. }
            | SheetsetError::NotFound { reason, .. }
            | SheetsetError::UpstreamUnavailable { reason, .. }
            | SheetsetError::Persistence { reason, .. } => reason,
            SheetsetError::Io { .. } => "io-error",
            SheetsetError::Json(_) => "json-error",
            SheetsetError::Config(_) => "config-error",
        }
    }

    /// Returns true for caller mistakes, false for collaborator failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SheetsetError::Validation { .. } | SheetsetError::NotFound { .. }
        )
    }
}

/// Result type alias for sheetset operations.
pub type Result<T> = std::result::Result<T, SheetsetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_is_stable() {
        let err = SheetsetError::validation("bad-model", "No entities selected");
        assert_eq!(err.reason(), "bad-model");
        assert_eq!(err.to_string(), "No entities selected");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_persistence_names_source() {
        let err = SheetsetError::persistence(
            "dataset-write",
            "Can not save dataset",
            StoreError::Unavailable("disk full".to_string()),
        );
        assert_eq!(err.reason(), "dataset-write");
        assert!(err.to_string().contains("disk full"));
        assert!(!err.is_client_error());
    }
}
