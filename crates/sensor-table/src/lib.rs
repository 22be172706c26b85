//! Sensor Time-Series Table
//!
//! Provides the column-oriented source table that windows are cut from.

mod table;

pub use table::{Column, ColumnData, SensorTable};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// A single cell read from a label or time column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric cell (sensor reading, numeric label, sequence time)
    Number(f64),
    /// Textual cell (class name, formatted timestamp)
    Text(String),
}

impl CellValue {
    /// Whether the cell holds text
    pub fn is_text(&self) -> bool {
        matches!(self, CellValue::Text(_))
    }

    /// Total ordering used for deterministic tie-breaking.
    ///
    /// Numbers sort before text; numbers use IEEE total order.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Errors while building or querying a table
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    /// Columns have different lengths
    #[error("Column '{name}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Two columns share a name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Column name is empty
    #[error("Column name must not be empty")]
    EmptyName,

    /// Requested column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}
