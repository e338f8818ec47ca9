//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser)]
#[command(
    name = "ops2fhir",
    version,
    about = "Convert OPS/substance mapping tables to MII FHIR resources",
    long_about = "Convert an OPS/substance mapping export into Medication, Patient,\n\
                  Procedure and MedicationStatement resources conforming to the\n\
                  Medizininformatik-Initiative profiles, and submit them to a FHIR\n\
                  R4 endpoint with a validate-then-create call per resource."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate resources and submit them to a FHIR endpoint.
    Submit(SubmitArgs),

    /// Generate resources and write them to JSON files, no network.
    Convert(ConvertArgs),
}

/// Source-file and column options shared by both subcommands.
#[derive(Args)]
pub struct SourceArgs {
    /// Path to the delimited mapping export.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Text encoding of the source file.
    #[arg(long, default_value = "ISO-8859-1")]
    pub encoding: String,

    /// Substance registry column (repeatable; name must contain unii, ask
    /// or cas).
    #[arg(
        long = "coding-column",
        value_name = "COLUMN",
        default_values_t = [
            "UNII_Substanz_allg".to_string(),
            "ASK_Substanz_allg".to_string(),
            "CAS_Substanz_allg".to_string(),
        ]
    )]
    pub coding_columns: Vec<String>,

    /// Substance display-text column.
    #[arg(long = "display-column", default_value = "Substanz_allg_engl_INN_oder_sonst")]
    pub display_column: String,

    /// Route-of-administration code column.
    #[arg(
        long = "route-code-column",
        default_value = "Routes and Methods of Administration - Concept Code"
    )]
    pub route_code_column: String,

    /// Route-of-administration display column.
    #[arg(
        long = "route-display-column",
        default_value = "Routes and Methods of Administration - Term"
    )]
    pub route_display_column: String,

    /// OPS procedure text column (also the dosage text).
    #[arg(long = "ops-text-column", default_value = "opsText")]
    pub ops_text_column: String,

    /// OPS procedure code column (used with --with-procedure).
    #[arg(long = "ops-code-column", default_value = "opsCode")]
    pub ops_code_column: String,

    /// UCUM unit code column.
    #[arg(long = "unit-code-column", default_value = "UCUM-Code")]
    pub unit_code_column: String,

    /// Unit description column.
    #[arg(long = "unit-column", default_value = "UCUM-Description")]
    pub unit_column: String,

    /// Minimum dose value column (decimal comma).
    #[arg(long = "low-column", default_value = "Einheit_Wert_min")]
    pub low_column: String,

    /// Maximum dose value column (decimal comma, may be empty per row).
    #[arg(long = "high-column", default_value = "Einheit_Wert_max")]
    pub high_column: String,

    /// Also generate a Procedure per row.
    #[arg(long = "with-procedure")]
    pub with_procedure: bool,

    /// Fixed OPS catalog version for all rows.
    ///
    /// Exactly one of --ops-version and --ops-version-column must be given
    /// when --with-procedure is set.
    #[arg(long = "ops-version")]
    pub ops_version: Option<String>,

    /// Column carrying a per-row OPS catalog version.
    #[arg(long = "ops-version-column")]
    pub ops_version_column: Option<String>,
}

#[derive(Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Base URL of the FHIR R4 endpoint.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: String,

    /// Do not verify TLS certificates (test servers only).
    #[arg(long)]
    pub insecure: bool,

    /// Reference this existing patient instead of creating one per row.
    #[arg(long = "patient-id", value_name = "ID")]
    pub patient_id: Option<String>,

    /// Skip the $validate call and create resources directly.
    #[arg(long = "no-validate")]
    pub no_validate: bool,

    /// File receiving the created MedicationStatement ids, one per line.
    #[arg(long, short, default_value = "posted_med_statements.txt")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory receiving the generated JSON documents.
    #[arg(long = "out-dir", default_value = "out")]
    pub out_dir: PathBuf,
}
