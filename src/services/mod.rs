//! Service layer
//!
//! Business logic on top of the persistence slot:
//!
//! - `ledger`: the owned store and its validated mutations
//! - `metrics`: balance, pacing, health and savings derived from a snapshot
//! - `filter`: list windows and newest-first ordering

pub mod filter;
pub mod ledger;
pub mod metrics;

pub use filter::{sort_newest_first, ExpenseFilter};
pub use ledger::{LedgerStore, NewExpense};
pub use metrics::{Dashboard, HealthStatus, SavingsProgress, StatusColor};
