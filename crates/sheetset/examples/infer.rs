//! Example: Infer column types of a delimited file without storing anything.
//!
//! Usage:
//!   cargo run --example infer -- <file_path>
//!
//! Example:
//!   cargo run --example infer -- data/houses.csv

use std::env;
use std::path::Path;

use sheetset::source::CsvDirSource;
use sheetset::{CellRead, GridRange, InferenceConfig, TabularSource, build_dataset};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example infer -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    if !Path::new(file_path).exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let source = CsvDirSource::new();
    let range = GridRange::default();
    let config = InferenceConfig::default();

    for sheet in source.sheets(file_path)? {
        if !sheet.is_grid() {
            println!("## {} (skipped, not a grid)", sheet.title);
            continue;
        }

        let grid = source.read_grid(file_path, &sheet.title, &range)?;
        let Some(dataset) = build_dataset(&sheet.title, "example", &grid, &config) else {
            println!("## {} (no values)", sheet.title);
            continue;
        };

        println!("## {} ({} rows)", sheet.title, dataset.row_count());
        for column in &dataset.header {
            let first = dataset
                .get(0, column.index)
                .map(|cell| cell.read_strings().join(", "))
                .unwrap_or_default();
            println!(
                "  {:>3}  {:24} {:9} e.g. [{}]",
                column.index,
                column.title,
                column.col_type.label(),
                first
            );
        }
        println!();
    }

    Ok(())
}
