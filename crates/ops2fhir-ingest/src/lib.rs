//! Source-table ingestion for the OPS→FHIR pipeline.
//!
//! The input is a delimited export of the OPS/substance mapping spreadsheet,
//! usually ISO-8859-1 encoded and using a decimal comma in the dose columns.
//! Loading restricts the file to a declared column subset, drops rows with
//! missing required values, and offers the two normalization passes the
//! generators rely on (`comma_to_dot`, `as_str`).

#![deny(unsafe_code)]

mod error;
mod reader;
mod table;

pub use error::{IngestError, Result};
pub use reader::CsvSource;
pub use table::{CellValue, Row, SourceTable};
