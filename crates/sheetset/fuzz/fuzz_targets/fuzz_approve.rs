//! Fuzz target for approval reshaping.
//!
//! Arbitrary selections must never panic and must leave the dataset
//! rectangular with cells matching their column types.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sheetset::{ApprovalModel, Cell, ColumnHeader, ColumnType, Dataset, HeaderSelection};

#[derive(Debug, Arbitrary)]
struct Input {
    width: u8,
    rows: u8,
    selections: Vec<(u8, u8, i8, bool)>,
    skip: i64,
    limit: i64,
}

fuzz_target!(|input: Input| {
    let width = usize::from(input.width % 16);
    let rows = usize::from(input.rows % 32);

    let header = (0..width)
        .map(|c| {
            let col_type = if c % 2 == 0 {
                ColumnType::NumberArray
            } else {
                ColumnType::StringArray
            };
            ColumnHeader::new(format!("c{c}"), c, col_type)
        })
        .collect();
    let body = (0..rows)
        .map(|r| {
            (0..width)
                .map(|c| {
                    if c % 2 == 0 {
                        Cell::numbers(vec![r as f64])
                    } else {
                        Cell::strings(vec![format!("{r}")])
                    }
                })
                .collect()
        })
        .collect();
    let mut dataset = Dataset::new("fuzz", "USER_ID", header, body);

    let selections = input
        .selections
        .iter()
        .take(32)
        .map(|(origin, index, decimals, output)| {
            HeaderSelection::new(usize::from(*origin), usize::from(*index), "t")
                .with_decimals(*decimals)
                .with_output(*output)
        })
        .collect();
    dataset.reshape(&ApprovalModel::new("fuzz", selections));

    assert_eq!(dataset.row_count(), rows);
    for row in &dataset.body {
        assert_eq!(row.len(), dataset.column_count());
        for (cell, header) in row.iter().zip(&dataset.header) {
            assert_eq!(cell.col_type(), header.col_type);
        }
    }

    dataset.paginate(input.skip, input.limit);
    assert!(dataset.row_count() <= rows);
});
