//! Well-known code system URIs and MII profile URLs.

/// FDA Unique Ingredient Identifier registry.
pub const SYSTEM_UNII: &str = "http://fdasis.nlm.nih.gov";

/// German Anatomisch-therapeutisch-chemische Klassifikation substance keys.
pub const SYSTEM_ASK: &str = "http://fhir.de/CodeSystem/ask";

/// CAS chemical registry numbers.
pub const SYSTEM_CAS: &str = "urn:oid:2.16.840.1.113883.6.61";

/// Units of measure (UCUM).
pub const SYSTEM_UCUM: &str = "http://unitsofmeasure.org";

/// EDQM routes and methods of administration.
pub const SYSTEM_EDQM: &str = "http://standardterms.edqm.eu";

/// SNOMED CT.
pub const SYSTEM_SNOMED: &str = "http://snomed.info/sct";

/// German OPS procedure classification (DIMDI).
pub const SYSTEM_OPS: &str = "http://fhir.de/CodeSystem/dimdi/ops";

/// RxNorm, used by the ingredient-type extension coding.
pub const SYSTEM_RXNORM: &str = "http://www.nlm.nih.gov/research/umls/rxnorm";

/// GKV insurance number namespace for patient identifiers.
pub const SYSTEM_GKV_KVID: &str = "http://fhir.de/NamingSystem/gkv/kvid-10";

/// MII medication module profile.
pub const PROFILE_MEDICATION: &str =
    "https://www.medizininformatik-initiative.de/fhir/core/StructureDefinition/Medication";

/// MII medication statement profile.
pub const PROFILE_MEDICATION_STATEMENT: &str =
    "https://www.medizininformatik-initiative.de/fhir/core/StructureDefinition/MedicationStatement";

/// MII procedure module profile.
pub const PROFILE_PROCEDURE: &str =
    "https://www.medizininformatik-initiative.de/fhir/core/StructureDefinition/Procedure";

/// MII patient module profile.
pub const PROFILE_PATIENT: &str =
    "https://www.medizininformatik-initiative.de/fhir/core/StructureDefinition/Patient";

/// Ingredient-type (wirkstofftyp) extension on medication ingredients.
pub const EXTENSION_WIRKSTOFFTYP: &str =
    "https://www.medizininformatik-initiative.de/fhir/core/StructureDefinition/wirkstofftyp";
