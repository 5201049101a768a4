//! Fuzz target for column type inference.
//!
//! This fuzzer tests that inference and dataset assembly:
//! 1. Never panic on arbitrary cell text
//! 2. Always yield one cell per input value
//! 3. Keep every cell's type equal to the column type

#![no_main]

use libfuzzer_sys::fuzz_target;
use sheetset::{InferenceConfig, build_dataset, infer_column};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs
    if data.len() > 10_000 {
        return;
    }

    let content = String::from_utf8_lossy(data);
    let values: Vec<&str> = content.split('\n').collect();

    let inferred = infer_column(&values);
    assert_eq!(inferred.values.len(), values.len());
    for cell in &inferred.values {
        assert_eq!(cell.col_type(), inferred.col_type);
    }

    // Treat tab-separated lines as a grid
    let grid: Vec<Vec<String>> = values
        .iter()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect();
    for strict in [false, true] {
        let config = InferenceConfig::new().with_strict_numbers(strict);
        if let Some(dataset) = build_dataset("fuzz", "USER_ID", &grid, &config) {
            for row in &dataset.body {
                assert_eq!(row.len(), dataset.column_count());
            }
        }
    }
});
