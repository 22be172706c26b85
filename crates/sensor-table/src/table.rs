//! Column-Oriented Sensor Table

use crate::{CellValue, TableError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Values stored in one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnData {
    /// Numeric samples (channels, numeric labels, sequence time)
    Numeric(Vec<f64>),
    /// Text values (class labels, formatted timestamps)
    Text(Vec<String>),
}

impl ColumnData {
    /// Number of rows in the column
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    /// Check if the column has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a single cell
    pub fn cell(&self, row: usize) -> Option<CellValue> {
        match self {
            ColumnData::Numeric(v) => v.get(row).copied().map(CellValue::Number),
            ColumnData::Text(v) => v.get(row).cloned().map(CellValue::Text),
        }
    }

    /// Copy a half-open row range out as cells
    pub fn cells(&self, start: usize, end: usize) -> Vec<CellValue> {
        match self {
            ColumnData::Numeric(v) => v[start..end].iter().copied().map(CellValue::Number).collect(),
            ColumnData::Text(v) => v[start..end].iter().cloned().map(CellValue::Text).collect(),
        }
    }

    /// Borrow numeric values, `None` for text columns
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (channel, label or time)
    pub name: String,
    /// Column values
    #[serde(rename = "values")]
    pub data: ColumnData,
}

impl Column {
    /// Create a numeric column
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Create a text column
    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }
}

#[derive(Deserialize)]
struct RawTable {
    columns: Vec<Column>,
}

/// Multi-channel time series with optional time and label columns.
///
/// All columns have the same number of rows. The table is never mutated by
/// segmentation; windows copy the rows they cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct SensorTable {
    columns: Vec<Column>,
    #[serde(skip)]
    rows: usize,
}

impl TryFrom<RawTable> for SensorTable {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        SensorTable::from_columns(raw.columns)
    }
}

impl SensorTable {
    /// Build a table, validating names and lengths
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let rows = columns.first().map(|c| c.data.len()).unwrap_or(0);
        let mut seen = HashSet::with_capacity(columns.len());

        for column in &columns {
            if column.name.is_empty() {
                return Err(TableError::EmptyName);
            }
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
            if column.data.len() != rows {
                return Err(TableError::RaggedColumn {
                    name: column.name.clone(),
                    expected: rows,
                    actual: column.data.len(),
                });
            }
        }

        Ok(Self { columns, rows })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in table order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column, failing if absent
    pub fn require(&self, name: &str) -> Result<&Column, TableError> {
        self.column(name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Check whether a column exists
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}
