//! Introspector CLI library
//!
//! This module contains the core CLI logic for the Introspector diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::info;
use thiserror::Error;

use introspector::{Introspector, IntrospectorError, RecordFormat, Snapshot};

/// Errors surfaced by the CLI.
///
/// Library failures pass through unchanged. A missing case and an empty
/// component diagram are results of the library, and only become errors at
/// this boundary so that the process exits with a failure status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Introspector(#[from] IntrospectorError),

    #[error("Use case not found: {0}")]
    CaseNotFound(String),

    #[error("Nothing to render: no use case in scope")]
    Empty,

    #[error("Failed to write case listing: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Introspector(err.into())
    }
}

/// Run the Introspector CLI application
///
/// Reads the annotation records, builds a snapshot and writes the text
/// selected by the command to the output file or stdout.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid annotation records
/// - Unknown use case (`sequence`) or nothing in scope (`components`)
pub fn run(args: &Args) -> Result<(), CliError> {
    let command = &args.command;
    info!(
        records_path = args.records,
        command:?;
        "Processing annotation records"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let path = Path::new(&args.records);
    let source = fs::read_to_string(path)?;

    let introspector = Introspector::new(app_config);
    let records = introspector.parse_records(&source, RecordFormat::from_path(path))?;
    let snapshot = introspector.load(records);

    let text = render(&introspector, &snapshot, command)?;

    match &args.output {
        Some(output) => {
            fs::write(output, text)?;
            info!(output_file = output; "Output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn render(
    introspector: &Introspector,
    snapshot: &Snapshot,
    command: &Command,
) -> Result<String, CliError> {
    let text = match command {
        Command::Cases { json: true } => {
            let mut text = serde_json::to_string_pretty(&introspector.list_cases(snapshot))?;
            text.push('\n');
            text
        }
        Command::Cases { json: false } => introspector
            .list_cases(snapshot)
            .iter()
            .map(|case| format!("{}\t{}\n", case.name, case.text.as_deref().unwrap_or("")))
            .collect(),
        Command::UseCases => introspector.render_use_cases(snapshot)?,
        Command::Sequence { case, scale } => introspector
            .render_sequence(snapshot, case, *scale)?
            .ok_or_else(|| CliError::CaseNotFound(case.clone()))?,
        Command::Components { case, scale } => introspector
            .render_components(snapshot, case.as_deref(), *scale)?
            .ok_or_else(|| match case.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => CliError::CaseNotFound(name.to_string()),
                _ => CliError::Empty,
            })?,
        Command::All => introspector.render_all(snapshot)?,
    };

    Ok(text)
}
