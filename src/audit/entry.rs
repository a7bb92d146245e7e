//! Ledger change events

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, Money};

/// One committed mutation of the ledger record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum LedgerChange {
    AllowanceSet { before: Money, after: Money },
    GoalSet { before: Money, after: Money },
    ExpenseAdded { expense: Expense },
    ExpenseRemoved { expense: Expense },
    /// Counts of what was wiped
    Reset {
        allowance: Money,
        goal: Money,
        expenses: usize,
    },
}

impl LedgerChange {
    /// Short tag used in history output and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AllowanceSet { .. } => "allowance",
            Self::GoalSet { .. } => "goal",
            Self::ExpenseAdded { .. } => "expense+",
            Self::ExpenseRemoved { .. } => "expense-",
            Self::Reset { .. } => "reset",
        }
    }
}

impl fmt::Display for LedgerChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllowanceSet { before, after } | Self::GoalSet { before, after } => {
                write!(f, "{} -> {}", before, after)
            }
            Self::ExpenseAdded { expense } | Self::ExpenseRemoved { expense } => {
                write!(f, "{}", expense)
            }
            Self::Reset {
                allowance,
                goal,
                expenses,
            } => write!(
                f,
                "cleared allowance {}, goal {} and {} expense(s)",
                allowance, goal, expenses
            ),
        }
    }
}

/// A change stamped with the time it was committed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub change: LedgerChange,
}

impl AuditEntry {
    pub fn now(change: LedgerChange) -> Self {
        Self {
            at: Utc::now(),
            change,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<9} {}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.change.kind(),
            self.change
        )
    }
}
