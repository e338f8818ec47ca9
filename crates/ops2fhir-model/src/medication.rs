//! The Medication resource: one ingredient with substance codings and the
//! MII wirkstofftyp extension.

use serde::Serialize;

use crate::types::{CodeableConcept, Extension, Meta};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationIngredient {
    pub extension: Vec<Extension>,
    pub item_codeable_concept: CodeableConcept,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Medication {
    #[serde(rename = "resourceType")]
    resource_type: &'static str,
    /// Client-assigned id, only set when writing resources to files; the
    /// server assigns its own id on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    pub ingredient: Vec<MedicationIngredient>,
}

impl Medication {
    pub fn new(meta: Meta, ingredient: MedicationIngredient) -> Self {
        Self {
            resource_type: "Medication",
            id: None,
            meta,
            ingredient: vec![ingredient],
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems;
    use crate::types::Coding;
    use serde_json::json;

    #[test]
    fn test_medication_wire_shape() {
        let ingredient = MedicationIngredient {
            extension: vec![Extension {
                url: systems::EXTENSION_WIRKSTOFFTYP.to_string(),
                value_coding: Coding::new(systems::SYSTEM_RXNORM, "IN", Some("ingredient".into())),
            }],
            item_codeable_concept: Coding::new(
                systems::SYSTEM_ASK,
                "12345",
                Some("Amoxicillin".into()),
            )
            .into(),
        };
        let medication = Medication::new(Meta::for_profile(systems::PROFILE_MEDICATION), ingredient);

        let value = serde_json::to_value(&medication).unwrap();
        assert_eq!(value["resourceType"], "Medication");
        assert_eq!(
            value["meta"]["profile"],
            json!([systems::PROFILE_MEDICATION])
        );
        assert_eq!(
            value["ingredient"][0]["itemCodeableConcept"]["coding"][0]["code"],
            "12345"
        );
        assert_eq!(
            value["ingredient"][0]["extension"][0]["valueCoding"]["code"],
            "IN"
        );
    }
}
