//! Row-to-resource generators.
//!
//! Each generator is configured once (profile URL, coding systems, column
//! bindings) and then applied per row. `generate` is pure field mapping;
//! iteration over a whole table goes through [`rows::RowPass`], which logs
//! and skips failed rows while preserving row order.

#![deny(unsafe_code)]

mod cells;
pub mod dates;
mod error;
mod medication;
mod patient;
mod procedure;
mod rows;
mod statement;

pub use dates::random_datetime;
pub use error::{GenerateError, Result};
pub use medication::MedicationGenerator;
pub use patient::PatientGenerator;
pub use procedure::{OpsVersion, ProcedureGenerator};
pub use rows::RowPass;
pub use statement::MedicationStatementGenerator;
