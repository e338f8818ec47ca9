//! Minimal Patient generation.
//!
//! The source rows carry no patient data; each processed row gets a fresh
//! synthetic patient with a random insurance-number identifier, matching
//! what the mapping pipeline posts when no real patient id is supplied.

use ops2fhir_ingest::SourceTable;
use ops2fhir_model::{Identifier, Meta, Patient};
use uuid::Uuid;

use crate::rows::RowPass;

#[derive(Debug, Clone)]
pub struct PatientGenerator {
    profile: String,
    identifier_system: String,
}

impl PatientGenerator {
    pub fn new(profile: impl Into<String>, identifier_system: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            identifier_system: identifier_system.into(),
        }
    }

    /// Build one synthetic patient. Row contents are irrelevant.
    pub fn generate(&self) -> Patient {
        Patient::new(
            Meta::for_profile(&self.profile),
            Identifier {
                system: self.identifier_system.clone(),
                value: Uuid::new_v4().to_string(),
            },
        )
    }

    /// One patient per table row, in row order.
    pub fn iter_rows<'a>(
        &'a self,
        table: &'a SourceTable,
    ) -> impl Iterator<Item = Option<Patient>> + 'a {
        RowPass::new(table, move |_, _| Ok(self.generate()))
    }
}
