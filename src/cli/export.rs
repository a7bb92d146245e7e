//! CLI commands for data export

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml};
use crate::reports::SpendingReport;
use crate::services::{ExpenseFilter, LedgerStore};
use crate::storage::LedgerPersistence;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expenses only)
    Csv,
    /// JSON format (full ledger and dashboard)
    Json,
    /// YAML format (full ledger and dashboard, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the whole ledger to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export expenses to CSV
    Expenses {
        /// Output file path
        output: PathBuf,

        /// all, today or week
        #[arg(short, long, default_value = "all")]
        filter: ExpenseFilter,
    },

    /// Export the per-category spending report to CSV
    Report {
        /// Output file path
        output: PathBuf,

        /// all, today or week
        #[arg(short, long, default_value = "all")]
        filter: ExpenseFilter,
    },
}

/// Handle export commands
pub fn handle_export_command<P: LedgerPersistence>(
    store: &LedgerStore<P>,
    today: NaiveDate,
    cmd: ExportCommands,
) -> TrackerResult<()> {
    let record = store.snapshot();

    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Csv => {
                    export_expenses_csv(record, ExpenseFilter::All, today, &mut writer)?;
                    println!("Expenses exported to: {}", output.display());
                    println!("Note: CSV holds expenses only. Use JSON or YAML for the full ledger.");
                }
                ExportFormat::Json => {
                    export_full_json(record, today, &mut writer, pretty)?;
                    println!("Ledger exported to: {}", output.display());
                }
                ExportFormat::Yaml => {
                    export_full_yaml(record, today, &mut writer)?;
                    println!("Ledger exported to: {}", output.display());
                }
            }
            finish(writer)
        }

        ExportCommands::Expenses { output, filter } => {
            let mut writer = create_output(&output)?;
            let count = export_expenses_csv(record, filter, today, &mut writer)?;
            finish(writer)?;
            println!("Exported {} expense(s) to: {}", count, output.display());
            Ok(())
        }

        ExportCommands::Report { output, filter } => {
            let mut writer = create_output(&output)?;
            SpendingReport::generate(record, filter, today).export_csv(&mut writer)?;
            finish(writer)?;
            println!("Spending report exported to: {}", output.display());
            Ok(())
        }
    }
}

fn create_output(output: &Path) -> TrackerResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>) -> TrackerResult<()> {
    writer
        .flush()
        .map_err(|e| TrackerError::Export(format!("Failed to write export: {}", e)))
}
