//! Expense categories
//!
//! The known set is fixed. Stored expenses keep their category as free text,
//! so an unknown label is still a valid expense and is shown as `Other`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The known expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Entertainment,
    Stationary,
    Bills,
    Shopping,
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Stationary,
        ExpenseCategory::Bills,
        ExpenseCategory::Shopping,
        ExpenseCategory::Other,
    ];

    /// Wire label, as stored in the ledger file
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Stationary => "stationary",
            Self::Bills => "bills",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }

    /// Look up a known category; `None` for anything outside the set
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }

    /// Presentation fallback: unknown labels display as `Other`
    pub fn from_label_or_other(label: &str) -> Self {
        Self::from_label(label).unwrap_or(Self::Other)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Stationary => "Stationary",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown category '{}'", s))
    }
}
