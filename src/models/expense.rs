//! Expense model
//!
//! An expense is created once and never edited; it leaves the ledger only
//! through an explicit delete.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;

/// A single dated expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier within the ledger
    pub id: ExpenseId,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Category label; free text, see [`Expense::kind`]
    pub category: String,

    /// Calendar date, no time-of-day
    pub date: NaiveDate,

    /// Optional note; `null` reads as empty
    #[serde(default, deserialize_with = "note_or_empty")]
    pub note: String,
}

fn note_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Expense {
    /// Create an expense without a note
    pub fn new(id: ExpenseId, amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            amount,
            category: category.into(),
            date,
            note: String::new(),
        }
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Known category for display; unknown labels map to `Other`
    pub fn kind(&self) -> ExpenseCategory {
        ExpenseCategory::from_label_or_other(&self.category)
    }

    /// Whether the stored label is one of the known categories
    pub fn has_known_category(&self) -> bool {
        ExpenseCategory::from_label(&self.category).is_some()
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind(),
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
