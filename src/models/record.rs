//! The persisted ledger record
//!
//! One record holds everything the tracker knows: the allowance, the savings
//! goal and the expense list. It is saved and loaded as a single unit.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use super::expense::Expense;
use super::ids::ExpenseId;
use super::money::Money;

/// Allowance, goal and expenses, persisted together
///
/// Reading is field by field: a malformed allowance or goal reads as zero and
/// a malformed expense entry is dropped, each with a warning, so one bad
/// value never costs the rest of the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Money budgeted for the month
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub allowance: Money,

    /// Savings target
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub goal: Money,

    /// Expenses in insertion order; display order is computed, never stored
    #[serde(default, deserialize_with = "readable_expenses")]
    pub expenses: Vec<Expense>,
}

fn amount_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(Money::zero());
    }
    Ok(Money::deserialize(&value).unwrap_or_else(|e| {
        warn!(found = %value, error = %e, "unreadable stored amount, using zero");
        Money::zero()
    }))
}

fn readable_expenses<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Expense>, D::Error> {
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!(found = %other, "stored expenses are not a list, ignoring them");
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match Expense::deserialize(&entry) {
            Ok(expense) => Some(expense),
            Err(e) => {
                warn!(index, entry = %entry, error = %e, "dropped unreadable stored expense");
                None
            }
        })
        .collect())
}

impl LedgerRecord {
    /// Lifetime total of all expense amounts
    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    pub fn find(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ExpenseId) -> bool {
        self.find(id).is_some()
    }

    /// Largest id in use, if any
    pub fn max_id(&self) -> Option<ExpenseId> {
        self.expenses.iter().map(|e| e.id).max()
    }

    /// Repair invariant violations in a record read from storage
    ///
    /// Negative allowance or goal clamp to zero; expenses with a non-positive
    /// amount or a repeated id are dropped. Returns a description of every
    /// repair made, empty when the record was already valid.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut repairs = Vec::new();

        if self.allowance.is_negative() {
            repairs.push(format!("negative allowance {} reset to zero", self.allowance));
            self.allowance = Money::zero();
        }
        if self.goal.is_negative() {
            repairs.push(format!("negative goal {} reset to zero", self.goal));
            self.goal = Money::zero();
        }

        let mut seen = HashSet::new();
        self.expenses.retain(|expense| {
            if let Err(e) = expense.validate() {
                repairs.push(format!("dropped expense {}: {}", expense.id, e));
                return false;
            }
            if !seen.insert(expense.id) {
                repairs.push(format!("dropped expense {}: duplicate id", expense.id));
                return false;
            }
            true
        });

        repairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(id: u64, cents: i64) -> Expense {
        Expense::new(
            ExpenseId::new(id),
            Money::from_cents(cents),
            "food",
            NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
        )
    }

    #[test]
    fn test_default_is_zero() {
        let record = LedgerRecord::default();
        assert!(record.allowance.is_zero());
        assert!(record.goal.is_zero());
        assert!(record.expenses.is_empty());
        assert!(record.max_id().is_none());
    }

    #[test]
    fn test_total_spent() {
        let record = LedgerRecord {
            allowance: Money::from_cents(100_000),
            goal: Money::zero(),
            expenses: vec![expense(1, 1500), expense(2, 2550)],
        };
        assert_eq!(record.total_spent().cents(), 4050);
        assert_eq!(record.max_id(), Some(ExpenseId::new(2)));
        assert!(record.contains(ExpenseId::new(1)));
        assert!(!record.contains(ExpenseId::new(9)));
    }

    #[test]
    fn test_sanitize_repairs_invariants() {
        let mut record = LedgerRecord {
            allowance: Money::from_cents(-100),
            goal: Money::from_cents(5000),
            expenses: vec![expense(1, 100), expense(1, 200), expense(2, 0), expense(3, 300)],
        };

        let repairs = record.sanitize();
        assert_eq!(repairs.len(), 3);
        assert!(record.allowance.is_zero());
        assert_eq!(record.goal.cents(), 5000);
        let ids: Vec<u64> = record.expenses.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_sanitize_valid_record_is_untouched() {
        let mut record = LedgerRecord {
            allowance: Money::from_cents(100),
            goal: Money::zero(),
            expenses: vec![expense(1, 100)],
        };
        let before = record.clone();
        assert!(record.sanitize().is_empty());
        assert_eq!(record, before);
    }

    #[test]
    fn test_browser_layout_parses() {
        let json = r#"{
            "allowance": 1000,
            "goal": 500,
            "expenses": [
                {"id": 1717000000000, "amount": 45.5, "category": "food", "date": "2025-06-01", "note": "canteen"}
            ]
        }"#;
        let record: LedgerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.allowance.cents(), 100_000);
        assert_eq!(record.goal.cents(), 50_000);
        assert_eq!(record.expenses[0].amount.cents(), 4550);
    }

    #[test]
    fn test_missing_fields_default() {
        let record: LedgerRecord = serde_json::from_str(r#"{"allowance": 250}"#).unwrap();
        assert_eq!(record.allowance.cents(), 25_000);
        assert!(record.expenses.is_empty());
    }

    #[test]
    fn test_one_bad_expense_keeps_the_rest() {
        let json = r#"{
            "allowance": 1000,
            "goal": 500,
            "expenses": [
                {"id": 1, "amount": 20, "category": "food", "date": "2025-06-01", "note": "ok"},
                {"id": 2, "amount": 5, "category": "food", "date": "2025-06-02", "note": null},
                {"id": 3, "amount": 7, "category": "food", "date": "June 3rd"},
                {"id": 4, "amount": "lots", "category": "fun", "date": "2025-06-04"},
                "not an expense"
            ]
        }"#;

        let record: LedgerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.allowance.cents(), 100_000);
        assert_eq!(record.goal.cents(), 50_000);
        let ids: Vec<u64> = record.expenses.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(record.expenses[1].note, "");
    }

    #[test]
    fn test_bad_top_level_fields_read_as_defaults() {
        let record: LedgerRecord = serde_json::from_str(
            r#"{"allowance": "lots", "goal": null, "expenses": {"id": 1}}"#,
        )
        .unwrap();
        assert_eq!(record, LedgerRecord::default());
    }

    #[test]
    fn test_non_object_is_still_an_error() {
        assert!(serde_json::from_str::<LedgerRecord>("\"ledger\"").is_err());
        assert!(serde_json::from_str::<LedgerRecord>("true").is_err());
    }
}
