//! Library side of the `ops2fhir` CLI: logging setup, column bindings and
//! the per-row submission pipeline.

#![deny(unsafe_code)]

pub mod columns;
pub mod logging;
pub mod pipeline;
pub mod summary;
