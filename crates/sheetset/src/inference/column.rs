//! Column-wide type inference.

use serde::{Deserialize, Serialize};

use crate::schema::{Cell, ColumnType};

use super::patterns::{
    is_bracketed, is_bracketed_numbers, is_plain_number, parse_number, split_array,
};

/// Configuration for column inference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Only type a column as numeric when every piece actually parses.
    ///
    /// Off by default: unparsable pieces then become `0.0`.
    pub strict_numbers: bool,
}

impl InferenceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_numbers(mut self, strict: bool) -> Self {
        self.strict_numbers = strict;
        self
    }
}

/// Type and converted values of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct InferredColumn {
    pub col_type: ColumnType,
    pub values: Vec<Cell>,
}

impl InferredColumn {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Classifies raw string columns.
///
/// Rules, in priority order; every value of the column must satisfy a rule
/// for it to apply:
///
/// 1. bracketed list starting with a digit: numbers, one per piece
/// 2. bracketed list: strings, one per piece
/// 3. plain number: a single number
/// 4. anything else: the original string
///
/// A column is never mixed: one non-conforming value moves the whole column
/// down the list.
#[derive(Debug, Clone, Default)]
pub struct ColumnInferer {
    config: InferenceConfig,
}

impl ColumnInferer {
    /// Create an inferer with the permissive default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inferer with custom configuration.
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Infer the type of one column and convert its values.
    pub fn infer<S: AsRef<str>>(&self, values: &[S]) -> InferredColumn {
        let values: Vec<&str> = values.iter().map(|v| v.as_ref()).collect();

        if values.iter().all(|v| is_bracketed_numbers(v)) {
            if let Some(cells) = self.number_arrays(&values) {
                return InferredColumn {
                    col_type: ColumnType::NumberArray,
                    values: cells,
                };
            }
        }

        if values.iter().all(|v| is_bracketed(v)) {
            let cells = values
                .iter()
                .map(|v| Cell::strings(split_array(v).into_iter().map(String::from).collect()))
                .collect();
            return InferredColumn {
                col_type: ColumnType::StringArray,
                values: cells,
            };
        }

        if values.iter().all(|v| is_plain_number(v)) {
            if let Some(cells) = self.scalar_numbers(&values) {
                return InferredColumn {
                    col_type: ColumnType::NumberArray,
                    values: cells,
                };
            }
        }

        InferredColumn {
            col_type: ColumnType::StringArray,
            values: values
                .iter()
                .map(|v| Cell::strings(vec![(*v).to_string()]))
                .collect(),
        }
    }

    fn number_arrays(&self, values: &[&str]) -> Option<Vec<Cell>> {
        values
            .iter()
            .map(|v| {
                split_array(v)
                    .into_iter()
                    .map(|piece| self.number(piece))
                    .collect::<Option<Vec<f64>>>()
                    .map(Cell::numbers)
            })
            .collect()
    }

    fn scalar_numbers(&self, values: &[&str]) -> Option<Vec<Cell>> {
        values
            .iter()
            .map(|v| self.number(v).map(|n| Cell::numbers(vec![n])))
            .collect()
    }

    /// `None` only in strict mode; permissive mode coerces failures to zero.
    fn number(&self, piece: &str) -> Option<f64> {
        match parse_number(piece) {
            Some(value) => Some(value),
            None if self.config.strict_numbers => None,
            None => Some(0.0),
        }
    }
}

/// Infer a column with the default configuration.
pub fn infer_column<S: AsRef<str>>(values: &[S]) -> InferredColumn {
    ColumnInferer::new().infer(values)
}
