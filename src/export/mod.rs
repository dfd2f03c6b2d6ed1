//! Export module for savings-cli
//!
//! Provides data export in multiple formats:
//! - CSV: one flat table per record kind (spreadsheet-compatible)
//! - JSON: machine-readable full store export
//! - YAML: human-readable full store export

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::reports::build_ledger;
use crate::storage::Storage;

pub use self::csv::{export_cards_csv, export_distributions_csv, export_expenses_csv, export_ledger_csv};
pub use json::{export_full_json, write_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, write_yaml};

/// What to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Ledger,
    Distributions,
    Cards,
    Expenses,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Export `target` from one snapshot of the store
pub fn export<W: Write>(
    storage: &Storage,
    target: ExportTarget,
    format: ExportFormat,
    writer: W,
) -> TrackerResult<()> {
    let data = storage.snapshot()?;
    let user = storage.user();

    match (target, format) {
        (ExportTarget::All, ExportFormat::Csv) => Err(TrackerError::Validation(
            "A full export needs json or yaml; CSV covers one table at a time".into(),
        )),
        (ExportTarget::All, ExportFormat::Json) => export_full_json(user, &data, writer),
        (ExportTarget::All, ExportFormat::Yaml) => export_full_yaml(user, &data, writer),

        (ExportTarget::Ledger, ExportFormat::Csv) => export_ledger_csv(&data, writer),
        (ExportTarget::Distributions, ExportFormat::Csv) => export_distributions_csv(&data, writer),
        (ExportTarget::Cards, ExportFormat::Csv) => export_cards_csv(&data, writer),
        (ExportTarget::Expenses, ExportFormat::Csv) => export_expenses_csv(&data, writer),

        (ExportTarget::Ledger, format) => {
            let ledger = build_ledger(data.entries.as_slice(), data.profile.initial_balance);
            write_structured(&ledger, format, writer)
        }
        (ExportTarget::Distributions, format) => {
            write_structured(data.distributions.as_slice(), format, writer)
        }
        (ExportTarget::Cards, format) => write_structured(data.cc_expenses.as_slice(), format, writer),
        (ExportTarget::Expenses, format) => {
            write_structured(data.daily_expenses.as_slice(), format, writer)
        }
    }
}

fn write_structured<W: Write, T: serde::Serialize + ?Sized>(
    value: &T,
    format: ExportFormat,
    writer: W,
) -> TrackerResult<()> {
    match format {
        ExportFormat::Yaml => write_yaml(value, writer),
        _ => write_json(value, writer),
    }
}
