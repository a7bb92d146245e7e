//! Core data models
//!
//! The whole ledger is one [`LedgerRecord`]: an allowance, a savings goal and
//! a list of [`Expense`] entries.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod record;

pub use category::ExpenseCategory;
pub use expense::{Expense, ExpenseValidationError};
pub use ids::{ClockIds, ExpenseId, IdGenerator, SequentialIds};
pub use money::{Money, MoneyParseError};
pub use record::LedgerRecord;
