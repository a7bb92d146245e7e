//! YAML Export
//!
//! Same content as the JSON export, in a human-readable form.

use chrono::NaiveDate;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::FullExport;
use crate::models::LedgerRecord;

/// Export the full ledger to YAML
pub fn export_full_yaml<W: Write>(
    record: &LedgerRecord,
    today: NaiveDate,
    writer: &mut W,
) -> TrackerResult<()> {
    let export = FullExport::new(record, today);
    let export_err = |e: std::io::Error| TrackerError::Export(e.to_string());

    writeln!(writer, "# Allowance tracker export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TrackerError::Export(e.to_string()))
}
