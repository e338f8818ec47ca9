//! Typed cell access shared by the generators.

use ops2fhir_ingest::{CellValue, Row};

use crate::error::{GenerateError, Result};

/// The cell as text; missing and numeric cells are row errors.
pub fn require_text<'a>(row: &'a Row, column: &str) -> Result<&'a str> {
    match row.cell(column) {
        CellValue::Text(value) => Ok(value),
        CellValue::Missing => Err(GenerateError::MissingCell {
            column: column.to_string(),
        }),
        CellValue::Number(_) => Err(GenerateError::NotText {
            column: column.to_string(),
        }),
    }
}

/// The cell as a number; missing and text cells are row errors.
pub fn require_number(row: &Row, column: &str) -> Result<f64> {
    match row.cell(column) {
        CellValue::Number(value) => Ok(*value),
        CellValue::Missing => Err(GenerateError::MissingCell {
            column: column.to_string(),
        }),
        CellValue::Text(_) => Err(GenerateError::NotNumeric {
            column: column.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_number() {
        let mut row = Row::new();
        row.insert("code", CellValue::Number(1.0));
        assert!(matches!(
            require_text(&row, "code"),
            Err(GenerateError::NotText { .. })
        ));
    }

    #[test]
    fn test_require_number_rejects_text() {
        let mut row = Row::new();
        row.insert("low", CellValue::Text("3,5".into()));
        assert!(matches!(
            require_number(&row, "low"),
            Err(GenerateError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_missing_cell() {
        let row = Row::new();
        assert!(matches!(
            require_text(&row, "absent"),
            Err(GenerateError::MissingCell { .. })
        ));
    }
}
