//! Ledger slot backed by a JSON file

use std::path::{Path, PathBuf};

use tracing::debug;

use super::file_io::{read_json, write_json_atomic};
use super::{recover_record, LedgerPersistence};
use crate::config::paths::TrackerPaths;
use crate::error::TrackerResult;
use crate::models::LedgerRecord;

/// Stores the ledger as pretty-printed JSON, replaced atomically on save
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the standard `data/ledger.json` location
    pub fn at_paths(paths: &TrackerPaths) -> Self {
        Self::new(paths.ledger_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether anything has been saved yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl LedgerPersistence for JsonFileStorage {
    fn load(&self) -> LedgerRecord {
        debug!(path = %self.path.display(), "loading ledger");
        let source = self.path.display().to_string();
        recover_record(&source, read_json(&self.path))
    }

    fn save(&self, record: &LedgerRecord) -> TrackerResult<()> {
        debug!(
            path = %self.path.display(),
            expenses = record.expenses.len(),
            "saving ledger"
        );
        write_json_atomic(&self.path, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseId, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, JsonFileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("data").join("ledger.json"));
        (temp_dir, storage)
    }

    fn sample_record() -> LedgerRecord {
        LedgerRecord {
            allowance: Money::from_cents(100_000),
            goal: Money::from_cents(50_000),
            expenses: vec![Expense::new(
                ExpenseId::new(1_717_000_000_000),
                Money::from_cents(4550),
                "food",
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            )
            .with_note("canteen")],
        }
    }

    #[test]
    fn test_missing_file_loads_default() {
        let (_temp, storage) = create_test_storage();
        assert!(!storage.exists());
        assert_eq!(storage.load(), LedgerRecord::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_temp, storage) = create_test_storage();
        let record = sample_record();

        storage.save(&record).unwrap();
        assert_eq!(storage.load(), record);
    }

    #[test]
    fn test_garbage_loads_default() {
        let (_temp, storage) = create_test_storage();
        std::fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        std::fs::write(storage.path(), "this is not json").unwrap();

        assert_eq!(storage.load(), LedgerRecord::default());
    }

    #[test]
    fn test_wrong_shape_loads_default() {
        let (_temp, storage) = create_test_storage();
        std::fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        std::fs::write(storage.path(), r#"{"allowance": "lots"}"#).unwrap();

        assert_eq!(storage.load(), LedgerRecord::default());
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let (_temp, storage) = create_test_storage();
        storage.save(&sample_record()).unwrap();

        let replacement = LedgerRecord {
            allowance: Money::from_cents(200),
            ..LedgerRecord::default()
        };
        storage.save(&replacement).unwrap();

        assert_eq!(storage.load(), replacement);
    }
}
