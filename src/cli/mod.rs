//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger store, metrics and the
//! supporting backup/export/report modules. Handlers print to stdout and
//! return errors for `main` to report.

pub mod backup;
pub mod dashboard;
pub mod expense;
pub mod export;
pub mod ledger;

pub use backup::{handle_backup_command, BackupCommands};
pub use dashboard::{handle_report, handle_status};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use ledger::{handle_history, handle_reset, handle_set_allowance, handle_set_goal};

use chrono::NaiveDate;

use crate::audit::AuditLogger;
use crate::config::{Settings, TrackerPaths};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ClockIds, Money};
use crate::services::LedgerStore;
use crate::storage::JsonFileStorage;

/// The store as the binary uses it
pub type FileLedger = LedgerStore<JsonFileStorage>;

/// Open the on-disk ledger with auditing and the configured category mode
pub fn open_store(paths: &TrackerPaths, settings: &Settings) -> TrackerResult<FileLedger> {
    paths.ensure_directories()?;

    Ok(LedgerStore::open(JsonFileStorage::at_paths(paths), ClockIds::new())
        .with_audit(AuditLogger::new(paths.audit_log()))
        .strict_categories(settings.strict_categories))
}

/// Parse a user-entered amount
pub fn parse_amount(input: &str) -> TrackerResult<Money> {
    Money::parse(input).map_err(|e| TrackerError::InvalidAmount(e.to_string()))
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", input.trim()))
    })
}
