//! In-memory FHIR R4 model for the OPS→FHIR conversion pipeline.
//!
//! Only the datatypes and resources the Medizininformatik-Initiative (MII)
//! profiles actually need are modelled. Every struct serializes directly to
//! the FHIR JSON wire shape, so a resource can be handed to the submission
//! client without an intermediate mapping step.

#![deny(unsafe_code)]

pub mod medication;
pub mod patient;
pub mod procedure;
pub mod statement;
pub mod systems;
pub mod types;

pub use medication::{Medication, MedicationIngredient};
pub use patient::Patient;
pub use procedure::{Performed, Procedure};
pub use statement::{Dosage, DosageDoseAndRate, DoseValue, Effective, MedicationStatement};
pub use types::{
    CodeableConcept, Coding, Extension, FhirDateTime, Identifier, Meta, Period, Quantity, Range,
    Reference, ResourceType,
};
