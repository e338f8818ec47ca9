//! Medication generation from substance coding columns.

use ops2fhir_ingest::{Row, SourceTable};
use ops2fhir_model::{
    CodeableConcept, Coding, Extension, Medication, MedicationIngredient, Meta, systems,
};

use crate::cells;
use crate::error::{GenerateError, Result};
use crate::rows::RowPass;

/// Maps a substance-registry column name to its coding system URI.
///
/// The export names its columns after the registries, so a case-insensitive
/// substring is enough to pick the system.
fn system_for_column(column: &str) -> Option<&'static str> {
    let lower = column.to_lowercase();
    if lower.contains("unii") {
        Some(systems::SYSTEM_UNII)
    } else if lower.contains("ask") {
        Some(systems::SYSTEM_ASK)
    } else if lower.contains("cas") {
        Some(systems::SYSTEM_CAS)
    } else {
        None
    }
}

/// Builds one MII Medication per row from up to three substance columns.
#[derive(Debug, Clone)]
pub struct MedicationGenerator {
    coding_columns: Vec<(String, &'static str)>,
    display_column: String,
    extension: Extension,
    profile: String,
}

impl MedicationGenerator {
    /// Configure the generator once.
    ///
    /// Fails with a fatal configuration error when no coding column is given
    /// or a column name matches none of the known substance registries.
    pub fn new(
        coding_columns: &[&str],
        display_column: impl Into<String>,
        extension_url: impl Into<String>,
        extension_system: impl Into<String>,
        extension_code: impl Into<String>,
        extension_display: impl Into<String>,
        profile: impl Into<String>,
    ) -> Result<Self> {
        if coding_columns.is_empty() {
            return Err(GenerateError::config("no coding columns configured"));
        }
        let mut resolved = Vec::with_capacity(coding_columns.len());
        for &column in coding_columns {
            let system = system_for_column(column).ok_or_else(|| {
                GenerateError::config(format!(
                    "coding column '{column}' matches no known substance registry"
                ))
            })?;
            resolved.push((column.to_string(), system));
        }
        Ok(Self {
            coding_columns: resolved,
            display_column: display_column.into(),
            extension: Extension {
                url: extension_url.into(),
                value_coding: Coding::new(
                    extension_system,
                    extension_code,
                    Some(extension_display.into()),
                ),
            },
            profile: profile.into(),
        })
    }

    /// Build one Medication from a row. Pure: no I/O, no randomness.
    pub fn generate(&self, row: &Row) -> Result<Medication> {
        let display = cells::require_text(row, &self.display_column)?;

        let mut codings = Vec::new();
        for (column, system) in &self.coding_columns {
            // Registry columns are sparse; a missing or numeric cell just
            // means this registry has no code for the substance.
            let Some(code) = row.text(column) else {
                continue;
            };
            codings.push(Coding::new(*system, code, Some(display.to_string())));
        }
        if codings.is_empty() {
            return Err(GenerateError::NoIngredientCodings);
        }

        let ingredient = MedicationIngredient {
            extension: vec![self.extension.clone()],
            item_codeable_concept: CodeableConcept::new(codings),
        };
        Ok(Medication::new(
            Meta::for_profile(&self.profile),
            ingredient,
        ))
    }

    /// One-shot pass over a whole table, yielding `None` for failed rows.
    pub fn iter_rows<'a>(
        &'a self,
        table: &'a SourceTable,
    ) -> impl Iterator<Item = Option<Medication>> + 'a {
        RowPass::new(table, move |_, row| self.generate(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ops2fhir_ingest::CellValue;

    fn generator() -> MedicationGenerator {
        MedicationGenerator::new(
            &["UNII_Substanz_allg", "ASK_Substanz_allg", "CAS_Substanz_allg"],
            "Substanz_allg_engl_INN_oder_sonst",
            systems::EXTENSION_WIRKSTOFFTYP,
            systems::SYSTEM_RXNORM,
            "IN",
            "ingredient",
            systems::PROFILE_MEDICATION,
        )
        .unwrap()
    }

    fn row(display: Option<&str>, unii: Option<&str>, ask: Option<&str>) -> Row {
        let mut row = Row::new();
        if let Some(display) = display {
            row.insert("Substanz_allg_engl_INN_oder_sonst", CellValue::Text(display.into()));
        }
        if let Some(unii) = unii {
            row.insert("UNII_Substanz_allg", CellValue::Text(unii.into()));
        }
        if let Some(ask) = ask {
            row.insert("ASK_Substanz_allg", CellValue::Text(ask.into()));
        }
        row
    }

    #[test]
    fn test_builds_coding_per_populated_column() {
        let med = generator()
            .generate(&row(Some("Amoxicillin"), Some("804826J2HU"), Some("12345")))
            .unwrap();
        let codings = &med.ingredient[0].item_codeable_concept.coding;
        assert_eq!(codings.len(), 2);
        assert_eq!(codings[0].system, systems::SYSTEM_UNII);
        assert_eq!(codings[1].system, systems::SYSTEM_ASK);
        assert!(codings.iter().all(|c| c.display.as_deref() == Some("Amoxicillin")));
    }

    #[test]
    fn test_rejects_row_without_any_coding() {
        let error = generator()
            .generate(&row(Some("Amoxicillin"), None, None))
            .unwrap_err();
        assert!(matches!(error, GenerateError::NoIngredientCodings));
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_numeric_coding_cell_is_skipped() {
        let mut r = row(Some("Amoxicillin"), None, Some("12345"));
        r.insert("UNII_Substanz_allg", CellValue::Number(42.0));
        let med = generator().generate(&r).unwrap();
        assert_eq!(med.ingredient[0].item_codeable_concept.coding.len(), 1);
    }

    #[test]
    fn test_rejects_missing_display() {
        let error = generator()
            .generate(&row(None, Some("804826J2HU"), None))
            .unwrap_err();
        assert!(matches!(error, GenerateError::MissingCell { .. }));
    }

    #[test]
    fn test_rejects_numeric_display() {
        let mut r = row(None, Some("804826J2HU"), None);
        r.insert("Substanz_allg_engl_INN_oder_sonst", CellValue::Number(1.0));
        let error = generator().generate(&r).unwrap_err();
        assert!(matches!(error, GenerateError::NotText { .. }));
    }

    #[test]
    fn test_unknown_registry_column_is_fatal_config_error() {
        let error = MedicationGenerator::new(
            &["Wirkstoff"],
            "display",
            systems::EXTENSION_WIRKSTOFFTYP,
            systems::SYSTEM_RXNORM,
            "IN",
            "ingredient",
            systems::PROFILE_MEDICATION,
        )
        .unwrap_err();
        assert!(error.is_fatal());
    }

    #[test]
    fn test_empty_coding_column_list_is_fatal() {
        let error = MedicationGenerator::new(
            &[],
            "display",
            systems::EXTENSION_WIRKSTOFFTYP,
            systems::SYSTEM_RXNORM,
            "IN",
            "ingredient",
            systems::PROFILE_MEDICATION,
        )
        .unwrap_err();
        assert!(error.is_fatal());
    }
}
