//! Procedure generation from OPS code columns.

use ops2fhir_ingest::{Row, SourceTable};
use ops2fhir_model::{
    CodeableConcept, Coding, FhirDateTime, Meta, Performed, Period, Procedure, Reference,
    ResourceType,
};
use rand::Rng;

use crate::cells;
use crate::dates::random_datetime;
use crate::error::{GenerateError, Result};
use crate::rows::RowPass;

/// Where the OPS catalog version comes from: a fixed constant for the whole
/// table, or a per-row column. Exactly one must be configured.
#[derive(Debug, Clone)]
pub enum OpsVersion {
    Constant(String),
    Column(String),
}

impl OpsVersion {
    /// Resolve from the two optional configuration inputs.
    pub fn from_options(
        constant: Option<String>,
        column: Option<String>,
    ) -> Result<Self> {
        match (constant, column) {
            (Some(constant), None) => Ok(Self::Constant(constant)),
            (None, Some(column)) => Ok(Self::Column(column)),
            (Some(_), Some(_)) => Err(GenerateError::config(
                "OPS version supplied both as constant and as column",
            )),
            (None, None) => Err(GenerateError::config(
                "OPS version missing: supply a constant or a column",
            )),
        }
    }

    fn resolve(&self, row: &Row) -> Result<String> {
        match self {
            Self::Constant(version) => Ok(version.clone()),
            Self::Column(column) => cells::require_text(row, column).map(ToOwned::to_owned),
        }
    }
}

/// Builds one MII Procedure per row.
#[derive(Debug, Clone)]
pub struct ProcedureGenerator {
    profile: String,
    status: String,
    category: CodeableConcept,
    code_system: String,
    code_column: String,
    display_column: String,
    version: OpsVersion,
    /// Start/end columns for `performedPeriod`; a synthetic instant is used
    /// when absent.
    period_columns: Option<(String, String)>,
}

impl ProcedureGenerator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile: impl Into<String>,
        status: impl Into<String>,
        category_system: impl Into<String>,
        category_code: impl Into<String>,
        category_display: impl Into<String>,
        code_system: impl Into<String>,
        code_column: impl Into<String>,
        display_column: impl Into<String>,
        version: OpsVersion,
        period_columns: Option<(String, String)>,
    ) -> Self {
        Self {
            profile: profile.into(),
            status: status.into(),
            category: Coding::new(
                category_system,
                category_code,
                Some(category_display.into()),
            )
            .into(),
            code_system: code_system.into(),
            code_column: code_column.into(),
            display_column: display_column.into(),
            version,
            period_columns,
        }
    }

    /// Build one Procedure. The subject reference requires an already
    /// created patient id.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        row: &Row,
        patient_id: &str,
        rng: &mut R,
    ) -> Result<Procedure> {
        let code = cells::require_text(row, &self.code_column)?;
        let display = cells::require_text(row, &self.display_column)?;
        let version = self.version.resolve(row)?;

        let coding = Coding::new(&self.code_system, code, Some(display.to_string()))
            .with_version(version);

        let performed = match &self.period_columns {
            Some((start_column, end_column)) => Performed::Period(Period {
                start: FhirDateTime::new(cells::require_text(row, start_column)?),
                end: FhirDateTime::new(cells::require_text(row, end_column)?),
            }),
            None => Performed::DateTime(random_datetime(rng)),
        };

        Ok(Procedure::new(
            Meta::for_profile(&self.profile),
            &self.status,
            self.category.clone(),
            coding.into(),
            Reference::new(ResourceType::Patient, patient_id),
            performed,
        ))
    }

    /// One-shot pass over a table, zipped with per-row patient ids.
    pub fn iter_rows<'a, R: Rng>(
        &'a self,
        table: &'a SourceTable,
        patient_ids: &'a [String],
        rng: &'a mut R,
    ) -> impl Iterator<Item = Option<Procedure>> + 'a {
        RowPass::new(table, move |index, row| {
            let patient_id = patient_ids.get(index).ok_or_else(|| {
                GenerateError::config(format!("no patient id for row {index}"))
            })?;
            self.generate(row, patient_id, rng)
        })
    }
}
