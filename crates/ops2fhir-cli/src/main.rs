//! OPS→FHIR conversion CLI.

use clap::Parser;
use ops2fhir_cli::logging::{LogConfig, init_logging};
use ops2fhir_cli::summary::print_summary;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_convert, run_submit};

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        ..LogConfig::default()
    };
    init_logging(&log_config);

    let exit_code = match cli.command {
        Command::Submit(args) => match run_submit(&args) {
            Ok(summary) => {
                print_summary(&summary);
                if summary.statement_ids.is_empty() { 1 } else { 0 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Convert(args) => match run_convert(&args) {
            Ok(summary) => {
                println!("Rows processed: {}", summary.rows);
                println!("Files written:  {}", summary.files);
                println!("Rows skipped:   {}", summary.skipped);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
