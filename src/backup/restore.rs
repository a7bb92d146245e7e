//! Backup restoration
//!
//! Replaces the ledger file with the contents of a backup archive.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::models::LedgerRecord;
use crate::storage::{JsonFileStorage, LedgerPersistence};

use super::manager::{BackupArchive, BACKUP_SCHEMA_VERSION};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: TrackerPaths,
}

impl RestoreManager {
    pub fn new(paths: TrackerPaths) -> Self {
        Self { paths }
    }

    /// Restore the ledger from a backup file
    ///
    /// Overwrites the current ledger. Callers should take a backup first.
    pub fn restore_from_file(&self, backup_path: &Path) -> TrackerResult<RestoreResult> {
        let archive = read_archive(backup_path)?;
        self.restore_from_archive(&archive)
    }

    /// Restore the ledger from a parsed archive
    ///
    /// A `null` ledger (backup taken before anything was saved) restores the
    /// zero-default record.
    pub fn restore_from_archive(&self, archive: &BackupArchive) -> TrackerResult<RestoreResult> {
        let record = archive_record(archive)?;

        self.paths.ensure_directories()?;
        JsonFileStorage::at_paths(&self.paths).save(&record)?;

        info!(
            backup_date = %archive.created_at,
            expenses = record.expenses.len(),
            "ledger restored from backup"
        );

        Ok(RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            expense_count: record.expenses.len(),
            allowance_set: record.allowance.is_positive(),
            goal_set: record.goal.is_positive(),
        })
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> TrackerResult<ValidationResult> {
        let archive = read_archive(backup_path)?;
        let parsed = archive_record(&archive);

        Ok(ValidationResult {
            is_valid: parsed.is_ok() && archive.schema_version <= BACKUP_SCHEMA_VERSION,
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            has_ledger: !archive.ledger.is_null(),
            expense_count: parsed.map(|r| r.expenses.len()).unwrap_or(0),
        })
    }
}

fn read_archive(backup_path: &Path) -> TrackerResult<BackupArchive> {
    let contents = fs::read_to_string(backup_path)
        .map_err(|e| TrackerError::Io(format!("Failed to read backup file: {}", e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| TrackerError::Json(format!("Failed to parse backup file: {}", e)))
}

fn archive_record(archive: &BackupArchive) -> TrackerResult<LedgerRecord> {
    if archive.ledger.is_null() {
        return Ok(LedgerRecord::default());
    }

    let mut record: LedgerRecord = serde_json::from_value(archive.ledger.clone())
        .map_err(|e| TrackerError::MalformedPersistedData(format!("backup ledger: {}", e)))?;
    record.sanitize();
    Ok(record)
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub expense_count: usize,
    pub allowance_set: bool,
    pub goal_set: bool,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} expenses", self.expense_count)];
        if self.allowance_set {
            parts.push("allowance".to_string());
        }
        if self.goal_set {
            parts.push("goal".to_string());
        }
        format!("Restored: {}", parts.join(", "))
    }
}

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    /// Readable by this version and holding a well-formed ledger
    pub is_valid: bool,
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    /// False when the backup predates the first save
    pub has_ledger: bool,
    pub expense_count: usize,
}

impl ValidationResult {
    pub fn summary(&self) -> String {
        if !self.is_valid {
            format!("Invalid backup (v{})", self.schema_version)
        } else if self.has_ledger {
            format!(
                "Valid backup (v{}): {} expenses",
                self.schema_version, self.expense_count
            )
        } else {
            format!("Valid backup (v{}): empty ledger", self.schema_version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::manager::BackupManager;
    use crate::config::settings::BackupRetention;
    use crate::models::{Expense, ExpenseId, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_env() -> (RestoreManager, BackupManager, TrackerPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let backup_manager = BackupManager::new(paths.clone(), BackupRetention::default());
        let restore_manager = RestoreManager::new(paths.clone());

        (restore_manager, backup_manager, paths, temp_dir)
    }

    fn sample_record() -> LedgerRecord {
        LedgerRecord {
            allowance: Money::from_cents(50_000),
            goal: Money::from_cents(10_000),
            expenses: vec![Expense::new(
                ExpenseId::new(1),
                Money::from_cents(1250),
                "transport",
                NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            )],
        }
    }

    #[test]
    fn test_restore_from_backup() {
        let (restore_manager, backup_manager, paths, _temp) = create_test_env();
        let storage = JsonFileStorage::at_paths(&paths);
        storage.save(&sample_record()).unwrap();

        let backup_path = backup_manager.create_backup().unwrap();
        storage.save(&LedgerRecord::default()).unwrap();

        let result = restore_manager.restore_from_file(&backup_path).unwrap();
        assert_eq!(result.expense_count, 1);
        assert!(result.allowance_set);
        assert_eq!(result.summary(), "Restored: 1 expenses, allowance, goal");
        assert_eq!(storage.load(), sample_record());
    }

    #[test]
    fn test_restore_empty_backup_resets_ledger() {
        let (restore_manager, backup_manager, paths, _temp) = create_test_env();
        let backup_path = backup_manager.create_backup().unwrap();

        let storage = JsonFileStorage::at_paths(&paths);
        storage.save(&sample_record()).unwrap();

        restore_manager.restore_from_file(&backup_path).unwrap();
        assert_eq!(storage.load(), LedgerRecord::default());
    }

    #[test]
    fn test_restore_recreates_data_dir() {
        let (restore_manager, backup_manager, paths, _temp) = create_test_env();
        JsonFileStorage::at_paths(&paths).save(&sample_record()).unwrap();
        let backup_path = backup_manager.create_backup().unwrap();

        fs::remove_dir_all(paths.data_dir()).unwrap();
        restore_manager.restore_from_file(&backup_path).unwrap();
        assert!(paths.ledger_file().exists());
    }

    #[test]
    fn test_validate_backup() {
        let (restore_manager, backup_manager, paths, _temp) = create_test_env();
        JsonFileStorage::at_paths(&paths).save(&sample_record()).unwrap();
        let backup_path = backup_manager.create_backup().unwrap();

        let result = restore_manager.validate_backup(&backup_path).unwrap();
        assert!(result.is_valid);
        assert!(result.has_ledger);
        assert_eq!(result.expense_count, 1);
        assert_eq!(result.summary(), "Valid backup (v1): 1 expenses");
    }

    #[test]
    fn test_malformed_ledger_in_archive() {
        let (restore_manager, _backup_manager, paths, temp) = create_test_env();
        let path = temp.path().join("backup-20250101-000000.json");
        fs::write(
            &path,
            r#"{"schema_version":1,"created_at":"2025-01-01T00:00:00Z","ledger":"allowance: lots"}"#,
        )
        .unwrap();

        assert!(!restore_manager.validate_backup(&path).unwrap().is_valid);

        let err = restore_manager.restore_from_file(&path).unwrap_err();
        assert!(matches!(err, TrackerError::MalformedPersistedData(_)));
        assert!(!paths.ledger_file().exists());
    }

    #[test]
    fn test_unreadable_archive() {
        let (restore_manager, _backup_manager, _paths, temp) = create_test_env();
        let path = temp.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            restore_manager.validate_backup(&path),
            Err(TrackerError::Json(_))
        ));
    }
}
