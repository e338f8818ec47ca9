//! The per-row submission loop.
//!
//! For every source row, in order: Medication, Patient (unless a
//! pre-existing id is supplied), optionally Procedure, then the
//! MedicationStatement wiring them together. Each resource goes through
//! validate-then-create before the next one is built, so a reference is
//! only ever written to a resource that already exists server-side.
//!
//! A failure anywhere in a row abandons that row: already-created resources
//! are not rolled back, and later rows still run.

use rand::Rng;
use thiserror::Error;

use ops2fhir_client::{ClientError, FhirEndpoint};
use ops2fhir_generate::{
    GenerateError, MedicationGenerator, MedicationStatementGenerator, PatientGenerator,
    ProcedureGenerator,
};
use ops2fhir_ingest::{Row, SourceTable};
use ops2fhir_model::ResourceType;

/// Why one row was abandoned.
#[derive(Debug, Error)]
pub enum RowError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Where patient ids come from: one pre-existing patient for the whole run,
/// or a fresh generated patient per row.
pub enum PatientSource<'a> {
    Existing(&'a str),
    Generated(&'a PatientGenerator),
}

/// Everything the loop needs besides the endpoint and the table.
pub struct PipelineConfig<'a> {
    pub medication: &'a MedicationGenerator,
    pub patient: PatientSource<'a>,
    pub procedure: Option<&'a ProcedureGenerator>,
    pub statement: &'a MedicationStatementGenerator,
    pub validate: bool,
}

/// Outcome of a full run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows: usize,
    pub skipped: usize,
    /// Created MedicationStatement ids, in row order.
    pub statement_ids: Vec<String>,
}

/// Process every row of the table against the endpoint.
pub fn run<E, R>(
    endpoint: &E,
    table: &SourceTable,
    config: &PipelineConfig<'_>,
    rng: &mut R,
) -> RunSummary
where
    E: FhirEndpoint,
    R: Rng,
{
    let mut summary = RunSummary::default();
    for (index, row) in table.rows.iter().enumerate() {
        summary.rows += 1;
        match process_row(endpoint, row, config, rng) {
            Ok(statement_id) => {
                tracing::info!(
                    row = index,
                    statement_id = %statement_id,
                    "row submitted"
                );
                summary.statement_ids.push(statement_id);
            }
            Err(error) => {
                tracing::warn!(row = index, %error, "row skipped");
                summary.skipped += 1;
            }
        }
    }
    summary
}

fn process_row<E, R>(
    endpoint: &E,
    row: &Row,
    config: &PipelineConfig<'_>,
    rng: &mut R,
) -> Result<String, RowError>
where
    E: FhirEndpoint,
    R: Rng,
{
    let medication = config.medication.generate(row)?;
    let medication_id = endpoint
        .post_resource(
            &serde_json::to_value(&medication).map_err(ClientError::from)?,
            ResourceType::Medication,
            config.validate,
        )?
        .id;

    let patient_id = match &config.patient {
        PatientSource::Existing(id) => (*id).to_string(),
        PatientSource::Generated(generator) => {
            let patient = generator.generate();
            endpoint
                .post_resource(
                    &serde_json::to_value(&patient).map_err(ClientError::from)?,
                    ResourceType::Patient,
                    config.validate,
                )?
                .id
        }
    };

    let procedure_id = match config.procedure {
        Some(generator) => {
            let procedure = generator.generate(row, &patient_id, rng)?;
            let created = endpoint.post_resource(
                &serde_json::to_value(&procedure).map_err(ClientError::from)?,
                ResourceType::Procedure,
                config.validate,
            )?;
            Some(created.id)
        }
        None => None,
    };

    let statement = config.statement.generate(
        row,
        &medication_id,
        &patient_id,
        procedure_id.as_deref(),
        rng,
    )?;
    let created = endpoint.post_resource(
        &serde_json::to_value(&statement).map_err(ClientError::from)?,
        ResourceType::MedicationStatement,
        config.validate,
    )?;
    Ok(created.id)
}
