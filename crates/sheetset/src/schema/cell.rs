//! Cell values.
//!
//! A cell always holds a sequence: a plain number becomes a one-element
//! number sequence, a bracketed list becomes one element per piece.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Read access shared by both cell variants.
pub trait CellRead {
    /// Values as numbers, rounded to `decimals` places (0 when `None`).
    fn read_numbers(&self, decimals: Option<i8>) -> Vec<f64>;

    /// Values formatted as strings.
    fn read_strings(&self) -> Vec<String>;

    /// Number of values in the cell.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cell content for numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberCell(pub Vec<f64>);

/// Cell content for string columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringCell(pub Vec<String>);

impl CellRead for NumberCell {
    fn read_numbers(&self, decimals: Option<i8>) -> Vec<f64> {
        self.0.iter().map(|&v| round_number(v, decimals)).collect()
    }

    fn read_strings(&self) -> Vec<String> {
        self.0.iter().map(|v| v.to_string()).collect()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl CellRead for StringCell {
    fn read_numbers(&self, _decimals: Option<i8>) -> Vec<f64> {
        Vec::new()
    }

    fn read_strings(&self) -> Vec<String> {
        self.0.clone()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// One table cell.
///
/// Serialized as a bare JSON array. On its own an empty array deserializes
/// as [`Cell::Numbers`]; datasets and metadata re-type empty cells from
/// their headers when loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Numbers(NumberCell),
    Strings(StringCell),
}

impl Cell {
    pub fn numbers(values: Vec<f64>) -> Self {
        Cell::Numbers(NumberCell(values))
    }

    pub fn strings(values: Vec<String>) -> Self {
        Cell::Strings(StringCell(values))
    }

    /// The zero value for a column of the given type.
    pub fn empty(col_type: ColumnType) -> Self {
        match col_type {
            ColumnType::NumberArray => Cell::Numbers(NumberCell::default()),
            ColumnType::StringArray => Cell::Strings(StringCell::default()),
        }
    }

    /// The column type this cell belongs to.
    pub fn col_type(&self) -> ColumnType {
        match self {
            Cell::Numbers(_) => ColumnType::NumberArray,
            Cell::Strings(_) => ColumnType::StringArray,
        }
    }

    /// Borrow the variant as its read interface.
    pub fn as_read(&self) -> &dyn CellRead {
        match self {
            Cell::Numbers(cell) => cell,
            Cell::Strings(cell) => cell,
        }
    }

}

/// Give empty cells the variant of the column they sit in.
///
/// An empty cell has no JSON shape of its own and always reads back as
/// numbers, so rows loaded from JSON are re-typed against their columns.
pub(crate) fn retype_empty_cells(rows: &mut [Vec<Cell>], col_types: &[ColumnType]) {
    for row in rows {
        for (cell, &col_type) in row.iter_mut().zip(col_types) {
            if cell.is_empty() && cell.col_type() != col_type {
                *cell = Cell::empty(col_type);
            }
        }
    }
}

impl CellRead for Cell {
    fn read_numbers(&self, decimals: Option<i8>) -> Vec<f64> {
        self.as_read().read_numbers(decimals)
    }

    fn read_strings(&self) -> Vec<String> {
        self.as_read().read_strings()
    }

    fn len(&self) -> usize {
        self.as_read().len()
    }
}

impl From<Vec<f64>> for Cell {
    fn from(values: Vec<f64>) -> Self {
        Cell::numbers(values)
    }
}

impl From<Vec<String>> for Cell {
    fn from(values: Vec<String>) -> Self {
        Cell::strings(values)
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_number(value: f64, decimals: Option<i8>) -> f64 {
    let pow = 10f64.powi(i32::from(decimals.unwrap_or(0)));
    (value * pow).round() / pow
}
