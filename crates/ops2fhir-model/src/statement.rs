//! The MedicationStatement resource with its dosage substructure.

use serde::Serialize;

use crate::types::{CodeableConcept, FhirDateTime, Meta, Period, Quantity, Range, Reference};

/// The dose choice inside `doseAndRate`: a bare quantity when only a low
/// value is known, a range when the source row carries a high value too.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DoseValue {
    #[serde(rename = "doseQuantity")]
    Quantity(Quantity),
    #[serde(rename = "doseRange")]
    Range(Range),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DosageDoseAndRate {
    #[serde(flatten)]
    pub dose: DoseValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dosage {
    pub text: String,
    pub route: CodeableConcept,
    pub dose_and_rate: Vec<DosageDoseAndRate>,
}

/// The `effective[x]` choice element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Effective {
    #[serde(rename = "effectiveDateTime")]
    DateTime(FhirDateTime),
    #[serde(rename = "effectivePeriod")]
    Period(Period),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationStatement {
    #[serde(rename = "resourceType")]
    resource_type: &'static str,
    pub meta: Meta,
    /// Reference to the administering Procedure, when one was created for
    /// the same row.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub part_of: Vec<Reference>,
    pub status: String,
    pub medication_reference: Reference,
    pub subject: Reference,
    #[serde(flatten)]
    pub effective: Effective,
    pub dosage: Vec<Dosage>,
}

impl MedicationStatement {
    pub fn new(
        meta: Meta,
        status: impl Into<String>,
        medication_reference: Reference,
        subject: Reference,
        effective: Effective,
        dosage: Dosage,
    ) -> Self {
        Self {
            resource_type: "MedicationStatement",
            meta,
            part_of: Vec::new(),
            status: status.into(),
            medication_reference,
            subject,
            effective,
            dosage: vec![dosage],
        }
    }

    #[must_use]
    pub fn with_part_of(mut self, reference: Reference) -> Self {
        self.part_of.push(reference);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems;
    use crate::types::{Coding, ResourceType};

    fn quantity(value: f64) -> Quantity {
        Quantity {
            value,
            unit: "milligram".to_string(),
            system: systems::SYSTEM_UCUM.to_string(),
            code: "mg".to_string(),
        }
    }

    fn sample(dose: DoseValue) -> MedicationStatement {
        MedicationStatement::new(
            Meta::for_profile(systems::PROFILE_MEDICATION_STATEMENT),
            "completed",
            Reference::new(ResourceType::Medication, "m1"),
            Reference::new(ResourceType::Patient, "p1"),
            Effective::DateTime(FhirDateTime::new("2019-05-13T12:00:00+01:00")),
            Dosage {
                text: "give drug".to_string(),
                route: Coding::new(systems::SYSTEM_EDQM, "20053000", Some("oral".into())).into(),
                dose_and_rate: vec![DosageDoseAndRate { dose }],
            },
        )
    }

    #[test]
    fn test_dose_quantity_key() {
        let value = serde_json::to_value(sample(DoseValue::Quantity(quantity(5.0)))).unwrap();
        let dose = &value["dosage"][0]["doseAndRate"][0];
        assert_eq!(dose["doseQuantity"]["value"], 5.0);
        assert!(dose.get("doseRange").is_none());
    }

    #[test]
    fn test_dose_range_key() {
        let value = serde_json::to_value(sample(DoseValue::Range(Range {
            low: quantity(5.0),
            high: quantity(8.0),
        })))
        .unwrap();
        let dose = &value["dosage"][0]["doseAndRate"][0];
        assert_eq!(dose["doseRange"]["low"]["value"], 5.0);
        assert_eq!(dose["doseRange"]["high"]["value"], 8.0);
        assert!(dose.get("doseQuantity").is_none());
    }

    #[test]
    fn test_references_and_effective() {
        let value = serde_json::to_value(sample(DoseValue::Quantity(quantity(5.0)))).unwrap();
        assert_eq!(value["resourceType"], "MedicationStatement");
        assert_eq!(value["medicationReference"]["reference"], "Medication/m1");
        assert_eq!(value["subject"]["reference"], "Patient/p1");
        assert_eq!(value["effectiveDateTime"], "2019-05-13T12:00:00+01:00");
        assert_eq!(value["dosage"][0]["route"]["coding"][0]["code"], "20053000");
    }

    #[test]
    fn test_part_of_serializes_only_when_set() {
        let bare = serde_json::to_value(sample(DoseValue::Quantity(quantity(5.0)))).unwrap();
        assert!(bare.get("partOf").is_none());

        let linked = serde_json::to_value(
            sample(DoseValue::Quantity(quantity(5.0)))
                .with_part_of(Reference::new(ResourceType::Procedure, "proc-7")),
        )
        .unwrap();
        assert_eq!(linked["partOf"][0]["reference"], "Procedure/proc-7");
    }
}
