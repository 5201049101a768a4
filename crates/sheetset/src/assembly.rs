//! Dataset assembly from inferred columns.

use log::debug;

use crate::inference::{ColumnInferer, InferenceConfig, InferredColumn, decide_header};
use crate::schema::{Cell, ColumnHeader, Dataset};

/// Split grid rows into columns.
///
/// Only the first `width` cells of a row are used. A row shorter than
/// `width` contributes nothing to the columns it lacks.
pub fn columns_from_grid<S: AsRef<str>>(rows: &[Vec<S>], width: usize) -> Vec<Vec<&str>> {
    let mut columns: Vec<Vec<&str>> = vec![Vec::new(); width];
    for row in rows {
        for (column, value) in columns.iter_mut().zip(row.iter()) {
            column.push(value.as_ref());
        }
    }
    columns
}

/// Transpose inferred columns into a row-major dataset.
///
/// The row count is the longest column. Each row is pre-filled with the
/// zero cell of every column type, so shorter columns leave empty cells.
/// Columns beyond `titles` are ignored; missing ones are typed as empty.
pub fn assemble(
    name: impl Into<String>,
    user_id: impl Into<String>,
    titles: Vec<String>,
    mut columns: Vec<InferredColumn>,
) -> Dataset {
    let width = titles.len();
    columns.truncate(width);
    while columns.len() < width {
        columns.push(ColumnInferer::new().infer::<&str>(&[]));
    }

    let row_count = columns.iter().map(InferredColumn::len).max().unwrap_or(0);
    let mut body: Vec<Vec<Cell>> = (0..row_count)
        .map(|_| columns.iter().map(|c| Cell::empty(c.col_type)).collect())
        .collect();

    let mut header = Vec::with_capacity(width);
    for (position, (title, column)) in titles.into_iter().zip(columns).enumerate() {
        header.push(ColumnHeader::new(title, position, column.col_type));
        for (row, cell) in column.values.into_iter().enumerate() {
            body[row][position] = cell;
        }
    }

    Dataset::new(name, user_id, header, body)
}

/// Build a dataset from a raw grid.
///
/// Returns `None` when the first row is empty or no data rows remain after
/// the header decision.
pub fn build_dataset<S: AsRef<str>>(
    name: &str,
    user_id: &str,
    grid: &[Vec<S>],
    config: &InferenceConfig,
) -> Option<Dataset> {
    let first_row = grid.first().filter(|row| !row.is_empty())?;
    let decision = decide_header(first_row);

    let rows = if decision.skip_first_row {
        &grid[1..]
    } else {
        grid
    };
    if rows.is_empty() {
        return None;
    }

    let inferer = ColumnInferer::with_config(config.clone());
    let columns: Vec<InferredColumn> = columns_from_grid(rows, decision.titles.len())
        .iter()
        .map(|values| inferer.infer(values))
        .collect();

    for (title, column) in decision.titles.iter().zip(&columns) {
        debug!(
            "sheet '{}': column '{}' inferred as {}",
            name,
            title,
            column.col_type.label()
        );
    }

    Some(assemble(name, user_id, decision.titles, columns))
}
