//! One-shot forward pass over a source table.

use ops2fhir_ingest::{Row, SourceTable};

use crate::error::Result;

/// Applies a fallible per-row build function across a table, in row order.
///
/// A failed row is logged and yielded as `None` so callers keep their
/// positional alignment with the table. The pass is finite and not
/// restartable; iterating again requires a new `RowPass`.
pub struct RowPass<'a, F> {
    rows: std::slice::Iter<'a, Row>,
    build: F,
    index: usize,
}

impl<'a, F, T> RowPass<'a, F>
where
    F: FnMut(usize, &'a Row) -> Result<T>,
{
    pub fn new(table: &'a SourceTable, build: F) -> Self {
        Self {
            rows: table.rows.iter(),
            build,
            index: 0,
        }
    }
}

impl<'a, F, T> Iterator for RowPass<'a, F>
where
    F: FnMut(usize, &'a Row) -> Result<T>,
{
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let index = self.index;
        self.index += 1;
        match (self.build)(index, row) {
            Ok(resource) => Some(Some(resource)),
            Err(error) => {
                tracing::warn!(row = index, %error, "failed to generate resource");
                Some(None)
            }
        }
    }
}
