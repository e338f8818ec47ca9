//! Encoding-aware CSV loading restricted to a column subset.

use std::path::Path;

use encoding_rs::Encoding;

use crate::error::{IngestError, Result};
use crate::table::{CellValue, Row, SourceTable};

/// Reads one delimited source file into a [`SourceTable`].
#[derive(Debug, Clone)]
pub struct CsvSource<'a> {
    /// Encoding label as declared by the data supplier (e.g. `ISO-8859-1`).
    pub encoding: &'a str,
    /// Columns to keep; every listed column must exist in the file.
    pub usecols: &'a [&'a str],
    /// Columns that must be non-empty for a row to survive.
    pub required: &'a [&'a str],
}

impl<'a> CsvSource<'a> {
    pub fn new(encoding: &'a str, usecols: &'a [&'a str], required: &'a [&'a str]) -> Self {
        Self {
            encoding,
            usecols,
            required,
        }
    }

    /// Load the file, restrict to the configured columns, and drop rows
    /// missing a required value.
    pub fn open(&self, path: &Path) -> Result<SourceTable> {
        let encoding = Encoding::for_label(self.encoding.as_bytes()).ok_or_else(|| {
            IngestError::UnknownEncoding {
                label: self.encoding.to_string(),
            }
        })?;

        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let (text, _, had_errors) = encoding.decode(&bytes);
        if had_errors {
            return Err(IngestError::EncodingMismatch {
                path: path.to_path_buf(),
                encoding: encoding.name().to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .clone();

        // Resolve the requested columns to file positions up front so a
        // misspelled column fails before any row is read.
        let mut indices = Vec::with_capacity(self.usecols.len());
        for &column in self.usecols {
            let idx = headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}') == column)
                .ok_or_else(|| IngestError::ColumnNotFound {
                    column: column.to_string(),
                })?;
            indices.push((column, idx));
        }

        let mut table = SourceTable {
            columns: self.usecols.iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        };

        let mut dropped = 0usize;
        for record in reader.records() {
            let record = record.map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

            let mut row = Row::new();
            for &(column, idx) in &indices {
                let value = record.get(idx).map(str::trim).unwrap_or_default();
                let cell = if value.is_empty() {
                    CellValue::Missing
                } else {
                    CellValue::Text(value.to_string())
                };
                row.insert(column, cell);
            }

            if self.required.iter().any(|c| row.cell(c).is_missing()) {
                dropped += 1;
                continue;
            }
            table.rows.push(row);
        }

        if dropped > 0 {
            tracing::debug!(
                path = %path.display(),
                dropped,
                "dropped rows with missing required values"
            );
        }

        if table.is_empty() {
            return Err(IngestError::EmptyTable {
                path: path.to_path_buf(),
            });
        }

        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            columns = table.columns.len(),
            "loaded source table"
        );

        Ok(table)
    }
}
