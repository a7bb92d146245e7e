//! Reports
//!
//! Spending analysis over the ledger's expenses.

pub mod spending;

pub use spending::{SpendingByCategory, SpendingReport};
