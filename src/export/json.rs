//! JSON Export functionality
//!
//! Exports a user's complete store to JSON with schema versioning. The ledger
//! is included alongside the raw records.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::reports::{build_ledger, LedgerEntry};
use crate::storage::UserData;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full store export structure
#[derive(Debug, Clone, Serialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Owner of the exported store
    pub user: String,

    /// Running ledger, newest first
    pub ledger: Vec<LedgerEntry>,

    /// All stored records
    pub data: UserData,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub entry_count: usize,
    pub distribution_count: usize,
    pub card_charge_count: usize,
    pub expense_count: usize,

    /// Oldest recorded month
    pub first_month: Option<String>,

    /// Newest recorded month
    pub last_month: Option<String>,
}

impl FullExport {
    pub fn new(user: &str, data: &UserData) -> Self {
        let ledger = build_ledger(data.entries.as_slice(), data.profile.initial_balance);

        let metadata = ExportMetadata {
            entry_count: data.entries.len(),
            distribution_count: data.distributions.len(),
            card_charge_count: data.cc_expenses.len(),
            expense_count: data.daily_expenses.len(),
            first_month: ledger.last().map(|e| e.month().to_string()),
            last_month: ledger.first().map(|e| e.month().to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user: user.to_string(),
            ledger,
            data: data.clone(),
            metadata,
        }
    }
}

/// Write any serializable value as pretty JSON
pub fn write_json<W: Write, T: Serialize + ?Sized>(value: &T, mut writer: W) -> TrackerResult<()> {
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(())
}

/// Export the full store as JSON
pub fn export_full_json<W: Write>(user: &str, data: &UserData, writer: W) -> TrackerResult<()> {
    write_json(&FullExport::new(user, data), writer)
}
