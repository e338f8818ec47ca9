//! MedicationStatement generation: dosage text, route, and dose value.

use ops2fhir_ingest::{Row, SourceTable};
use ops2fhir_model::{
    Coding, Dosage, DosageDoseAndRate, DoseValue, Effective, MedicationStatement, Meta, Quantity,
    Range, Reference, ResourceType,
};
use rand::Rng;

use crate::cells;
use crate::dates::random_datetime;
use crate::error::{GenerateError, Result};
use crate::rows::RowPass;

/// Builds one MII MedicationStatement per row.
#[derive(Debug, Clone)]
pub struct MedicationStatementGenerator {
    profile: String,
    status: String,
    route_system: String,
    route_code_column: String,
    route_display_column: String,
    text_column: String,
    low_column: String,
    high_column: String,
    unit_column: String,
    unit_code_column: String,
    unit_system: String,
}

impl MedicationStatementGenerator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile: impl Into<String>,
        status: impl Into<String>,
        route_system: impl Into<String>,
        route_code_column: impl Into<String>,
        route_display_column: impl Into<String>,
        text_column: impl Into<String>,
        low_column: impl Into<String>,
        high_column: impl Into<String>,
        unit_column: impl Into<String>,
        unit_code_column: impl Into<String>,
        unit_system: impl Into<String>,
    ) -> Self {
        Self {
            profile: profile.into(),
            status: status.into(),
            route_system: route_system.into(),
            route_code_column: route_code_column.into(),
            route_display_column: route_display_column.into(),
            text_column: text_column.into(),
            low_column: low_column.into(),
            high_column: high_column.into(),
            unit_column: unit_column.into(),
            unit_code_column: unit_code_column.into(),
            unit_system: unit_system.into(),
        }
    }

    /// Build one MedicationStatement referencing already created resources.
    /// A procedure id, when present, becomes a `partOf` reference.
    ///
    /// The effective timestamp is synthetic for now.
    /// TODO: switch to an effectivePeriod once the export carries
    /// administration start/end columns.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        row: &Row,
        medication_id: &str,
        patient_id: &str,
        procedure_id: Option<&str>,
        rng: &mut R,
    ) -> Result<MedicationStatement> {
        let dosage = Dosage {
            text: cells::require_text(row, &self.text_column)?.to_string(),
            route: Coding::new(
                &self.route_system,
                cells::require_text(row, &self.route_code_column)?,
                Some(cells::require_text(row, &self.route_display_column)?.to_string()),
            )
            .into(),
            dose_and_rate: vec![DosageDoseAndRate {
                dose: self.dose_value(row)?,
            }],
        };

        let mut statement = MedicationStatement::new(
            Meta::for_profile(&self.profile),
            &self.status,
            Reference::new(ResourceType::Medication, medication_id),
            Reference::new(ResourceType::Patient, patient_id),
            Effective::DateTime(random_datetime(rng)),
            dosage,
        );
        if let Some(procedure_id) = procedure_id {
            statement =
                statement.with_part_of(Reference::new(ResourceType::Procedure, procedure_id));
        }
        Ok(statement)
    }

    /// A bare quantity when the high cell is missing, a range otherwise.
    /// Both range ends share the row's unit and code.
    fn dose_value(&self, row: &Row) -> Result<DoseValue> {
        let unit = cells::require_text(row, &self.unit_column)?;
        let code = cells::require_text(row, &self.unit_code_column)?;
        let low = self.quantity(row, &self.low_column, unit, code)?;

        if row.cell(&self.high_column).is_missing() {
            Ok(DoseValue::Quantity(low))
        } else {
            let high = self.quantity(row, &self.high_column, unit, code)?;
            Ok(DoseValue::Range(Range { low, high }))
        }
    }

    fn quantity(&self, row: &Row, column: &str, unit: &str, code: &str) -> Result<Quantity> {
        Ok(Quantity {
            value: cells::require_number(row, column)?,
            unit: unit.to_string(),
            system: self.unit_system.clone(),
            code: code.to_string(),
        })
    }

    /// One-shot pass over a table, zipped with per-row medication, patient,
    /// and (when procedures were created) procedure ids.
    pub fn iter_rows<'a, R: Rng>(
        &'a self,
        table: &'a SourceTable,
        medication_ids: &'a [String],
        patient_ids: &'a [String],
        procedure_ids: Option<&'a [String]>,
        rng: &'a mut R,
    ) -> impl Iterator<Item = Option<MedicationStatement>> + 'a {
        RowPass::new(table, move |index, row| {
            let medication_id = medication_ids.get(index).ok_or_else(|| {
                GenerateError::config(format!("no medication id for row {index}"))
            })?;
            let patient_id = patient_ids.get(index).ok_or_else(|| {
                GenerateError::config(format!("no patient id for row {index}"))
            })?;
            let procedure_id = match procedure_ids {
                Some(ids) => Some(ids.get(index).ok_or_else(|| {
                    GenerateError::config(format!("no procedure id for row {index}"))
                })?),
                None => None,
            };
            self.generate(
                row,
                medication_id,
                patient_id,
                procedure_id.map(String::as_str),
                rng,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ops2fhir_ingest::CellValue;
    use ops2fhir_model::systems;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generator() -> MedicationStatementGenerator {
        MedicationStatementGenerator::new(
            systems::PROFILE_MEDICATION_STATEMENT,
            "completed",
            systems::SYSTEM_EDQM,
            "route_code",
            "route_display",
            "ops_text",
            "low",
            "high",
            "unit",
            "unit_code",
            systems::SYSTEM_UCUM,
        )
    }

    fn row(low: Option<f64>, high: Option<f64>) -> Row {
        let mut row = Row::new();
        row.insert("route_code", CellValue::Text("20053000".into()));
        row.insert("route_display", CellValue::Text("oral".into()));
        row.insert("ops_text", CellValue::Text("give drug".into()));
        row.insert("unit", CellValue::Text("milligram".into()));
        row.insert("unit_code", CellValue::Text("mg".into()));
        if let Some(low) = low {
            row.insert("low", CellValue::Number(low));
        }
        if let Some(high) = high {
            row.insert("high", CellValue::Number(high));
        }
        row
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_missing_high_yields_quantity() {
        let statement = generator()
            .generate(&row(Some(5.0), None), "m1", "p1", None, &mut rng())
            .unwrap();
        match &statement.dosage[0].dose_and_rate[0].dose {
            DoseValue::Quantity(quantity) => {
                assert_eq!(quantity.value, 5.0);
                assert_eq!(quantity.unit, "milligram");
                assert_eq!(quantity.code, "mg");
                assert_eq!(quantity.system, systems::SYSTEM_UCUM);
            }
            DoseValue::Range(_) => panic!("expected a bare quantity"),
        }
    }

    #[test]
    fn test_present_high_yields_range_with_shared_unit() {
        let statement = generator()
            .generate(&row(Some(5.0), Some(8.0)), "m1", "p1", None, &mut rng())
            .unwrap();
        match &statement.dosage[0].dose_and_rate[0].dose {
            DoseValue::Range(range) => {
                assert_eq!(range.low.value, 5.0);
                assert_eq!(range.high.value, 8.0);
                assert_eq!(range.low.unit, range.high.unit);
                assert_eq!(range.low.code, range.high.code);
                assert_eq!(range.low.system, range.high.system);
            }
            DoseValue::Quantity(_) => panic!("expected a range"),
        }
    }

    #[test]
    fn test_missing_low_fails_the_row() {
        let error = generator()
            .generate(&row(None, None), "m1", "p1", None, &mut rng())
            .unwrap_err();
        assert!(matches!(error, GenerateError::MissingCell { .. }));
    }

    #[test]
    fn test_unnormalized_low_fails_the_row() {
        let mut r = row(None, None);
        r.insert("low", CellValue::Text("5,0".into()));
        let error = generator()
            .generate(&r, "m1", "p1", None, &mut rng())
            .unwrap_err();
        assert!(matches!(error, GenerateError::NotNumeric { .. }));
    }

    #[test]
    fn test_numeric_unit_fails_the_row_when_range_required() {
        let mut r = row(Some(5.0), Some(8.0));
        r.insert("unit", CellValue::Number(1.0));
        let error = generator()
            .generate(&r, "m1", "p1", None, &mut rng())
            .unwrap_err();
        assert!(matches!(error, GenerateError::NotText { .. }));
    }

    #[test]
    fn test_references_and_route() {
        let statement = generator()
            .generate(&row(Some(5.0), None), "med-9", "pat-3", None, &mut rng())
            .unwrap();
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value["medicationReference"]["reference"], "Medication/med-9");
        assert_eq!(value["subject"]["reference"], "Patient/pat-3");
        assert_eq!(value["dosage"][0]["text"], "give drug");
        assert_eq!(
            value["dosage"][0]["route"]["coding"][0]["system"],
            systems::SYSTEM_EDQM
        );
    }

    #[test]
    fn test_procedure_id_becomes_part_of_reference() {
        let statement = generator()
            .generate(&row(Some(5.0), None), "m1", "p1", Some("proc-4"), &mut rng())
            .unwrap();
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value["partOf"][0]["reference"], "Procedure/proc-4");

        let without = generator()
            .generate(&row(Some(5.0), None), "m1", "p1", None, &mut rng())
            .unwrap();
        assert!(without.part_of.is_empty());
    }
}
