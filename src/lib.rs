//! Allowance tracker
//!
//! Keeps a monthly allowance, a savings goal and a list of expenses in a
//! single persisted record, and derives balance, daily budget, budget health
//! and savings progress from it.
//!
//! # Architecture
//!
//! - `models`: money, ids, categories, expenses and the ledger record
//! - `storage`: the persistence slot (JSON file or in-memory)
//! - `services`: the ledger store, metrics engine and expense filter
//! - `reports`: per-category spending breakdown
//! - `audit`: change history
//! - `backup`: ledger snapshots with retention
//! - `export`: CSV, JSON and YAML output
//! - `display`: terminal formatting
//! - `cli`: command handlers for the `allowance` binary
//! - `config`, `error`, `logging`: ambient plumbing
//!
//! # Example
//!
//! ```
//! use allowance_tracker::models::{Money, SequentialIds};
//! use allowance_tracker::services::{Dashboard, HealthStatus, LedgerStore, NewExpense};
//! use allowance_tracker::storage::MemoryStorage;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let mut store = LedgerStore::open(MemoryStorage::new(), SequentialIds::new());
//! store.set_allowance(Money::from_cents(100_000)).unwrap();
//! store
//!     .add_expense(NewExpense::new(Money::from_cents(1_250), "food", today))
//!     .unwrap();
//!
//! let dashboard = Dashboard::compute(store.snapshot(), today);
//! assert_eq!(dashboard.balance, Money::from_cents(98_750));
//! assert_eq!(dashboard.health, HealthStatus::Healthy);
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
