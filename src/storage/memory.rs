//! In-memory ledger slot
//!
//! Holds the serialized blob rather than the struct, so loads go through the
//! same parse-or-default path as the file backend.

use std::cell::RefCell;

use super::{recover_record, LedgerPersistence};
use crate::error::{TrackerError, TrackerResult};
use crate::models::LedgerRecord;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: RefCell<Option<String>>,
}

impl MemoryStorage {
    /// An empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with raw text, valid JSON or not
    pub fn with_raw(blob: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(blob.into())),
        }
    }

    /// Current raw contents of the slot
    pub fn raw(&self) -> Option<String> {
        self.blob.borrow().clone()
    }

    /// Empty the slot, as if storage were cleared externally
    pub fn clear(&self) {
        self.blob.borrow_mut().take();
    }
}

impl LedgerPersistence for MemoryStorage {
    fn load(&self) -> LedgerRecord {
        match self.blob.borrow().as_deref() {
            None => LedgerRecord::default(),
            Some(raw) => recover_record(
                "memory",
                serde_json::from_str(raw).map_err(TrackerError::from),
            ),
        }
    }

    fn save(&self, record: &LedgerRecord) -> TrackerResult<()> {
        let raw = serde_json::to_string(record)?;
        *self.blob.borrow_mut() = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseId, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_slot_loads_default() {
        assert_eq!(MemoryStorage::new().load(), LedgerRecord::default());
    }

    #[test]
    fn test_round_trip() {
        let storage = MemoryStorage::new();
        let record = LedgerRecord {
            allowance: Money::from_cents(75_025),
            goal: Money::from_cents(10_000),
            expenses: vec![
                Expense::new(
                    ExpenseId::new(10),
                    Money::from_cents(199),
                    "stationary",
                    NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                ),
                Expense::new(
                    ExpenseId::new(11),
                    Money::from_cents(5000),
                    "gym",
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                )
                .with_note("monthly pass"),
            ],
        };

        storage.save(&record).unwrap();
        assert_eq!(storage.load(), record);
    }

    #[test]
    fn test_malformed_blob_loads_default() {
        let storage = MemoryStorage::with_raw("{\"allowance\": 10,");
        assert_eq!(storage.load(), LedgerRecord::default());
    }

    #[test]
    fn test_clear_drops_data() {
        let storage = MemoryStorage::new();
        storage
            .save(&LedgerRecord {
                allowance: Money::from_cents(100),
                ..LedgerRecord::default()
            })
            .unwrap();
        storage.clear();
        assert!(storage.raw().is_none());
        assert_eq!(storage.load(), LedgerRecord::default());
    }
}
