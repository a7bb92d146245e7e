//! Change history
//!
//! Every committed ledger mutation is appended to `audit.log` as one JSON
//! line holding a [`LedgerChange`] and its UTC timestamp. `allowance history`
//! reads it back.

mod entry;
mod logger;

pub use entry::{AuditEntry, LedgerChange};
pub use logger::AuditLogger;
