//! Shared FHIR datatypes used across the resource structs.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// The resource types this pipeline creates on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Patient,
    Medication,
    MedicationStatement,
    Procedure,
}

impl ResourceType {
    /// Canonical path segment, as used in request URLs and references.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Medication => "Medication",
            Self::MedicationStatement => "MedicationStatement",
            Self::Procedure => "Procedure",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (system, code, display) triple identifying a concept in a code system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Coding {
    pub fn new(
        system: impl Into<String>,
        code: impl Into<String>,
        display: Option<String>,
    ) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
            display,
            version: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// A set of alternative codings for the same real-world concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
}

impl CodeableConcept {
    pub fn new(coding: Vec<Coding>) -> Self {
        Self { coding }
    }
}

impl From<Coding> for CodeableConcept {
    fn from(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
        }
    }
}

/// A measured amount with a UCUM (or other) unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
    pub system: String,
    pub code: String,
}

/// A low/high pair of quantities. Both ends must carry the same unit and
/// system; the builders enforce this by constructing both from one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: Quantity,
    pub high: Quantity,
}

/// An instant in FHIR dateTime notation (RFC 3339 with offset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FhirDateTime(pub String);

impl FhirDateTime {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A start/end pair of instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: FhirDateTime,
    pub end: FhirDateTime,
}

/// A pointer to another resource by type and server-assigned id.
///
/// Serializes as `{"reference": "<Type>/<id>"}`. The id is only known after
/// the target resource was created, so a `Reference` existing at all implies
/// the target exists server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub resource_type: ResourceType,
    pub id: String,
}

impl Reference {
    pub fn new(resource_type: ResourceType, id: impl Into<String>) -> Self {
        Self {
            resource_type,
            id: id.into(),
        }
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Reference", 1)?;
        state.serialize_field(
            "reference",
            &format!("{}/{}", self.resource_type.as_str(), self.id),
        )?;
        state.end()
    }
}

/// Resource metadata carrying the profile claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub profile: Vec<String>,
}

impl Meta {
    pub fn for_profile(profile: impl Into<String>) -> Self {
        Self {
            profile: vec![profile.into()],
        }
    }
}

/// An extension carrying a single coding value (the MII wirkstofftyp shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub url: String,
    pub value_coding: Coding,
}

/// A business identifier such as a GKV insurance number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub system: String,
    pub value: String,
}
