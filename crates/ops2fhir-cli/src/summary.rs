//! End-of-run reporting.

use crate::pipeline::RunSummary;

/// Print the run summary to stdout.
pub fn print_summary(summary: &RunSummary) {
    println!("Rows processed:               {}", summary.rows);
    println!(
        "MedicationStatements created: {}",
        summary.statement_ids.len()
    );
    println!("Rows skipped:                 {}", summary.skipped);
}
