//! The Procedure resource for OPS-coded drug-administration procedures.

use serde::Serialize;

use crate::types::{CodeableConcept, FhirDateTime, Meta, Period, Reference};

/// The `performed[x]` choice element: either a single instant or an explicit
/// start/end period. Serialized through the enum tag so the choice is decided
/// exactly once, at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Performed {
    #[serde(rename = "performedDateTime")]
    DateTime(FhirDateTime),
    #[serde(rename = "performedPeriod")]
    Period(Period),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Procedure {
    #[serde(rename = "resourceType")]
    resource_type: &'static str,
    /// Client-assigned id, only set when writing resources to files; the
    /// server assigns its own id on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    pub status: String,
    pub category: CodeableConcept,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(flatten)]
    pub performed: Performed,
}

impl Procedure {
    pub fn new(
        meta: Meta,
        status: impl Into<String>,
        category: CodeableConcept,
        code: CodeableConcept,
        subject: Reference,
        performed: Performed,
    ) -> Self {
        Self {
            resource_type: "Procedure",
            id: None,
            meta,
            status: status.into(),
            category,
            code,
            subject,
            performed,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
