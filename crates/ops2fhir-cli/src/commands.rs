//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use ops2fhir_client::FhirClient;
use ops2fhir_generate::{
    MedicationGenerator, MedicationStatementGenerator, OpsVersion, PatientGenerator,
    ProcedureGenerator,
};
use ops2fhir_ingest::{CsvSource, SourceTable};
use ops2fhir_model::systems;

use ops2fhir_cli::columns::ColumnConfig;
use ops2fhir_cli::pipeline::{self, PatientSource, PipelineConfig, RunSummary};

use crate::cli::{ConvertArgs, SourceArgs, SubmitArgs};

/// Outcome of the file-writing `convert` subcommand.
#[derive(Debug, Default)]
pub struct ConvertSummary {
    pub rows: usize,
    pub skipped: usize,
    pub files: usize,
}

fn column_config(source: &SourceArgs) -> ColumnConfig {
    ColumnConfig {
        coding: source.coding_columns.clone(),
        display: source.display_column.clone(),
        route_code: source.route_code_column.clone(),
        route_display: source.route_display_column.clone(),
        ops_text: source.ops_text_column.clone(),
        ops_code: source.ops_code_column.clone(),
        unit_code: source.unit_code_column.clone(),
        unit: source.unit_column.clone(),
        low: source.low_column.clone(),
        high: source.high_column.clone(),
    }
}

/// Read and normalize the source table. Any failure here is fatal.
fn load_table(source: &SourceArgs) -> Result<SourceTable> {
    let columns = column_config(source);

    let mut usecols = columns.usecols(source.with_procedure);
    if let Some(column) = &source.ops_version_column {
        usecols.push(column.clone());
    }
    let required = columns.required(source.with_procedure);

    let usecols: Vec<&str> = usecols.iter().map(String::as_str).collect();
    let required: Vec<&str> = required.iter().map(String::as_str).collect();
    let reader = CsvSource::new(&source.encoding, &usecols, &required);
    let mut table = reader
        .open(&source.csv)
        .with_context(|| format!("read source table {}", source.csv.display()))?;

    let numeric = columns.numeric();
    let numeric: Vec<&str> = numeric.iter().map(String::as_str).collect();
    table
        .comma_to_dot(&numeric)
        .context("normalize dose value columns")?;

    let coding: Vec<&str> = columns.coding.iter().map(String::as_str).collect();
    table
        .as_str(&coding)
        .context("stringify substance code columns")?;

    Ok(table)
}

struct Generators {
    medication: MedicationGenerator,
    statement: MedicationStatementGenerator,
    procedure: Option<ProcedureGenerator>,
}

/// Construct the generators. Configuration errors (bad coding columns, bad
/// OPS version setup) are fatal and surface here, before any network call.
fn build_generators(source: &SourceArgs) -> Result<Generators> {
    let columns = column_config(source);
    let coding: Vec<&str> = columns.coding.iter().map(String::as_str).collect();

    let medication = MedicationGenerator::new(
        &coding,
        &columns.display,
        systems::EXTENSION_WIRKSTOFFTYP,
        systems::SYSTEM_RXNORM,
        "IN",
        "ingredient",
        systems::PROFILE_MEDICATION,
    )
    .context("configure medication generator")?;

    let statement = MedicationStatementGenerator::new(
        systems::PROFILE_MEDICATION_STATEMENT,
        "completed",
        systems::SYSTEM_EDQM,
        &columns.route_code,
        &columns.route_display,
        &columns.ops_text,
        &columns.low,
        &columns.high,
        &columns.unit,
        &columns.unit_code,
        systems::SYSTEM_UCUM,
    );

    let procedure = if source.with_procedure {
        let version = OpsVersion::from_options(
            source.ops_version.clone(),
            source.ops_version_column.clone(),
        )
        .context("configure procedure generator")?;
        Some(ProcedureGenerator::new(
            systems::PROFILE_PROCEDURE,
            "completed",
            systems::SYSTEM_SNOMED,
            "182832007",
            "Procedure related to management of drug administration (procedure)",
            systems::SYSTEM_OPS,
            &columns.ops_code,
            &columns.ops_text,
            version,
            None,
        ))
    } else {
        None
    };

    Ok(Generators {
        medication,
        statement,
        procedure,
    })
}

/// Full pipeline: load, generate, validate-then-create, write the id list.
pub fn run_submit(args: &SubmitArgs) -> Result<RunSummary> {
    let table = load_table(&args.source)?;
    let generators = build_generators(&args.source)?;
    let patient_generator =
        PatientGenerator::new(systems::PROFILE_PATIENT, systems::SYSTEM_GKV_KVID);

    let client =
        FhirClient::new(&args.base_url, !args.insecure).context("build FHIR client")?;

    let config = PipelineConfig {
        medication: &generators.medication,
        patient: match &args.patient_id {
            Some(id) => PatientSource::Existing(id),
            None => PatientSource::Generated(&patient_generator),
        },
        procedure: generators.procedure.as_ref(),
        statement: &generators.statement,
        validate: !args.no_validate,
    };

    let mut rng = StdRng::from_entropy();
    let summary = pipeline::run(&client, &table, &config, &mut rng);

    write_id_list(&args.output, &summary.statement_ids)
        .with_context(|| format!("write id list {}", args.output.display()))?;

    Ok(summary)
}

fn write_id_list(path: &Path, ids: &[String]) -> std::io::Result<()> {
    let mut contents = ids.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    std::fs::write(path, contents)
}

/// Offline variant: write each row's resources as JSON documents, wiring
/// references through locally assigned uuids.
pub fn run_convert(args: &ConvertArgs) -> Result<ConvertSummary> {
    let table = load_table(&args.source)?;
    let generators = build_generators(&args.source)?;
    let patient_generator =
        PatientGenerator::new(systems::PROFILE_PATIENT, systems::SYSTEM_GKV_KVID);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output directory {}", args.out_dir.display()))?;

    let mut rng = StdRng::from_entropy();
    let mut summary = ConvertSummary::default();

    for (index, row) in table.rows.iter().enumerate() {
        summary.rows += 1;
        match convert_row(
            row,
            index,
            &generators,
            &patient_generator,
            &args.out_dir,
            &mut rng,
        ) {
            Ok(files) => summary.files += files,
            Err(error) => {
                tracing::warn!(row = index, %error, "row skipped");
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn convert_row(
    row: &ops2fhir_ingest::Row,
    index: usize,
    generators: &Generators,
    patient_generator: &PatientGenerator,
    out_dir: &Path,
    rng: &mut StdRng,
) -> Result<usize> {
    let medication_id = Uuid::new_v4().to_string();
    let patient_id = Uuid::new_v4().to_string();
    let mut files = 0usize;

    let medication = generators
        .medication
        .generate(row)?
        .with_id(&medication_id);
    write_resource(out_dir, &format!("Medication-{index}.json"), &medication)?;
    files += 1;

    let patient = patient_generator.generate().with_id(&patient_id);
    write_resource(out_dir, &format!("Patient-{index}.json"), &patient)?;
    files += 1;

    let procedure_id = match &generators.procedure {
        Some(generator) => {
            let procedure_id = Uuid::new_v4().to_string();
            let procedure = generator.generate(row, &patient_id, rng)?.with_id(&procedure_id);
            write_resource(out_dir, &format!("Procedure-{index}.json"), &procedure)?;
            files += 1;
            Some(procedure_id)
        }
        None => None,
    };

    let statement = generators.statement.generate(
        row,
        &medication_id,
        &patient_id,
        procedure_id.as_deref(),
        rng,
    )?;
    write_resource(
        out_dir,
        &format!("MedicationStatement-{index}.json"),
        &statement,
    )?;
    files += 1;

    Ok(files)
}

fn write_resource<T: serde::Serialize>(out_dir: &Path, name: &str, resource: &T) -> Result<()> {
    let path = out_dir.join(name);
    let json = serde_json::to_string_pretty(resource)?;
    std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "resource written");
    Ok(())
}
