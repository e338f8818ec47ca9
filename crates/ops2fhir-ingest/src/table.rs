//! Row-oriented source table with the two normalization passes the OPS
//! mapping export needs.

use std::collections::BTreeMap;

use crate::error::{IngestError, Result};

/// A single cell. Numbers only appear after [`SourceTable::comma_to_dot`];
/// everything read from the file starts out as text or missing.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// One source record, keyed by column name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    /// The raw cell, `Missing` when the column is absent from the row.
    pub fn cell(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&CellValue::Missing)
    }

    /// The cell as text, `None` when missing or numeric.
    pub fn text(&self, column: &str) -> Option<&str> {
        match self.cell(column) {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// The cell as a number, `None` when missing or text.
    pub fn number(&self, column: &str) -> Option<f64> {
        match self.cell(column) {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

/// A loaded source table: ordered rows over a fixed column set.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl SourceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn require_column(&self, column: &str) -> Result<()> {
        if self.columns.iter().any(|c| c == column) {
            Ok(())
        } else {
            Err(IngestError::ColumnNotFound {
                column: column.to_string(),
            })
        }
    }

    /// Normalize decimal-comma cells in the named columns to numbers.
    ///
    /// Idempotent: text cells are parsed after replacing `,` with `.`,
    /// already-numeric cells pass through, missing cells stay missing.
    pub fn comma_to_dot(&mut self, columns: &[&str]) -> Result<()> {
        for &column in columns {
            self.require_column(column)?;
            for row in &mut self.rows {
                let cell = row.cells.entry(column.to_string()).or_insert(CellValue::Missing);
                if let CellValue::Text(value) = cell {
                    let parsed: f64 = value.replace(',', ".").parse().map_err(|_| {
                        IngestError::NumericParse {
                            column: column.to_string(),
                            value: value.clone(),
                        }
                    })?;
                    *cell = CellValue::Number(parsed);
                }
            }
        }
        Ok(())
    }

    /// Force cells in the named columns to their text representation.
    pub fn as_str(&mut self, columns: &[&str]) -> Result<()> {
        for &column in columns {
            self.require_column(column)?;
            for row in &mut self.rows {
                let cell = row.cells.entry(column.to_string()).or_insert(CellValue::Missing);
                if let CellValue::Number(value) = cell {
                    *cell = CellValue::Text(format_number(*value));
                }
            }
        }
        Ok(())
    }
}

/// Render a number the way the downstream code systems expect: integral
/// values without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
