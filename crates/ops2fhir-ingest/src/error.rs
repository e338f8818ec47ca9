//! Error types for source-table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or preparing a source table.
///
/// All of these are fatal for the run: they occur before any resource is
/// built or any network call is made.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the source file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The encoding label is not a known character encoding.
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding { label: String },

    /// The file contents do not decode under the declared encoding.
    #[error("file {path} is not valid {encoding}")]
    EncodingMismatch { path: PathBuf, encoding: String },

    /// CSV parsing failed.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A requested column does not exist in the file.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A cell could not be normalized to a number.
    #[error("cell '{value}' in column '{column}' is not numeric")]
    NumericParse { column: String, value: String },

    /// The table has no rows after filtering.
    #[error("source table is empty: {path}")]
    EmptyTable { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
