//! YAML Export functionality
//!
//! Exports the complete store to YAML for human-readable backup.

use std::io::Write;

use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::FullExport;
use crate::storage::UserData;

pub fn write_yaml<W: Write, T: Serialize + ?Sized>(value: &T, writer: W) -> TrackerResult<()> {
    serde_yaml::to_writer(writer, value).map_err(|e| TrackerError::Export(e.to_string()))
}

/// Export the full store as YAML
pub fn export_full_yaml<W: Write>(user: &str, data: &UserData, mut writer: W) -> TrackerResult<()> {
    let export = FullExport::new(user, data);

    writeln!(writer, "# savings-cli export for {}", export.user)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))?;

    write_yaml(&export, writer)
}
