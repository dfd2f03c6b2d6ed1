//! CLI commands for data export
//!
//! Writes to `--output` when given, otherwise to standard output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::error::{TrackerError, TrackerResult};
use crate::export::{self, ExportTarget};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV (one table)
    Csv,
    /// JSON (machine-readable)
    Json,
    /// YAML (human-readable)
    Yaml,
}

impl From<ExportFormat> for export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Csv => Self::Csv,
            ExportFormat::Json => Self::Json,
            ExportFormat::Yaml => Self::Yaml,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportOptions {
    /// Output file path (default: standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the ledger with running totals
    Ledger(ExportOptions),
    /// Export distribution items
    Distributions(ExportOptions),
    /// Export card charges
    Cards(ExportOptions),
    /// Export daily expenses
    Expenses(ExportOptions),
    /// Export the whole store (json or yaml)
    All {
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> TrackerResult<()> {
    let (target, options) = match cmd {
        ExportCommands::Ledger(options) => (ExportTarget::Ledger, options),
        ExportCommands::Distributions(options) => (ExportTarget::Distributions, options),
        ExportCommands::Cards(options) => (ExportTarget::Cards, options),
        ExportCommands::Expenses(options) => (ExportTarget::Expenses, options),
        ExportCommands::All { output, format } => (ExportTarget::All, ExportOptions { output, format }),
    };
    let format: export::ExportFormat = options.format.into();

    match options.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export::export(storage, target, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| TrackerError::Export(e.to_string()))?;
            eprintln!("Exported {:?} as {} to: {}", target, format, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            export::export(storage, target, format, &mut lock)?;
            lock.flush()
                .map_err(|e| TrackerError::Export(e.to_string()))?;
        }
    }

    Ok(())
}
