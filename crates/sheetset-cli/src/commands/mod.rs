//! CLI command implementations.

pub mod approve;
pub mod archive;
pub mod ingest;
pub mod list;
pub mod read;
pub mod show;
pub mod sweep;

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use sheetset::source::CsvDirSource;
use sheetset::store::JsonDirStore;
use sheetset::{Cell, CellRead, DatasetService, Metadata, SheetsetConfig};

/// Global options shared by every command.
pub struct Context {
    pub store: PathBuf,
    pub config: Option<PathBuf>,
    pub user: Option<String>,
    pub strict_numbers: bool,
}

impl Context {
    /// Configuration file (or defaults) with command-line overrides applied.
    pub fn load_config(&self) -> sheetset::Result<SheetsetConfig> {
        let mut config = match &self.config {
            Some(path) => SheetsetConfig::load(path)?,
            None => SheetsetConfig::default(),
        };
        if let Some(user) = &self.user {
            config.ingest.user_id = user.clone();
        }
        if self.strict_numbers {
            config.inference.strict_numbers = true;
        }
        Ok(config)
    }

    /// Service over the JSON store directory, reading local delimited files.
    pub fn service(&self, config: SheetsetConfig) -> DatasetService {
        let store = Arc::new(JsonDirStore::new(&self.store));
        DatasetService::new(store.clone(), store, Arc::new(CsvDirSource::new())).with_config(config)
    }
}

/// Lifecycle state shown next to a metadata entry.
pub fn state_label(metadata: &Metadata) -> colored::ColoredString {
    if metadata.is_archived {
        "archived".red()
    } else if metadata.is_temporary {
        "temporary".yellow()
    } else {
        "approved".green()
    }
}

/// One-line summary of a metadata entry.
pub fn print_summary(metadata: &Metadata) {
    println!(
        "  {}  {} [{}] {} rows, {} columns",
        metadata.id.cyan(),
        metadata.name.white().bold(),
        state_label(metadata),
        metadata.size,
        metadata.header.len()
    );
}

/// Render a cell for terminal output.
pub fn format_cell(cell: &Cell) -> String {
    let values = cell.read_strings();
    if values.len() == 1 {
        values[0].clone()
    } else {
        format!("[{}]", values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&Cell::numbers(vec![1.5])), "1.5");
        assert_eq!(format_cell(&Cell::numbers(vec![1.0, 2.0])), "[1, 2]");
        assert_eq!(format_cell(&Cell::strings(vec!["a".into(), "b".into()])), "[a, b]");
        assert_eq!(format_cell(&Cell::strings(Vec::new())), "[]");
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let ctx = Context {
            store: PathBuf::from(".sheetset"),
            config: None,
            user: Some("alice".to_string()),
            strict_numbers: true,
        };
        let config = ctx.load_config().unwrap();
        assert_eq!(config.ingest.user_id, "alice");
        assert!(config.inference.strict_numbers);
    }

    #[test]
    fn test_service_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("people.csv");
        std::fs::write(&data, "name,age\nAlice,30\nBob,41\n").unwrap();

        let ctx = Context {
            store: dir.path().join("store"),
            config: None,
            user: None,
            strict_numbers: false,
        };
        let service = ctx.service(ctx.load_config().unwrap());
        let created = service.ingest(&data.to_string_lossy()).unwrap();
        assert_eq!(created.len(), 1);
        assert!(dir.path().join("store").join("metadata").exists());
        assert_eq!(service.metadata(&created[0].id).unwrap().size, 2);
    }
}
