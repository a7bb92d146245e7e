//! JSON Export
//!
//! The full ledger plus its computed dashboard, with schema versioning.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::LedgerRecord;
use crate::services::Dashboard;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of the tool that wrote the export
    pub app_version: String,
    /// Same layout as the ledger file
    pub ledger: LedgerRecord,
    /// Metrics as of `metadata.as_of`
    pub dashboard: Dashboard,
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub as_of: NaiveDate,
    pub expense_count: usize,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl FullExport {
    pub fn new(record: &LedgerRecord, today: NaiveDate) -> Self {
        let dates = || record.expenses.iter().map(|e| e.date);

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            ledger: record.clone(),
            dashboard: Dashboard::compute(record, today),
            metadata: ExportMetadata {
                as_of: today,
                expense_count: record.expenses.len(),
                earliest_expense: dates().min(),
                latest_expense: dates().max(),
            },
        }
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(
    record: &LedgerRecord,
    today: NaiveDate,
    writer: &mut W,
    pretty: bool,
) -> TrackerResult<()> {
    let export = FullExport::new(record, today);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TrackerError::Export(e.to_string()))
}
