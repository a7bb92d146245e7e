//! Expense identifiers and the generators that mint them
//!
//! Ids are plain integers on the wire. Generators are injected into the
//! ledger store so tests can use a deterministic counter while the binary
//! uses wall-clock milliseconds.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier of an expense within one ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

impl From<u64> for ExpenseId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Source of fresh expense ids
pub trait IdGenerator {
    /// Produce the next id; successive calls never repeat.
    /// `None` once the id space above the last id is used up.
    fn next_id(&mut self) -> Option<ExpenseId>;

    /// Last id handed out or resumed from
    fn last(&self) -> u64;

    /// Make sure future ids are strictly greater than `last`
    fn resume_after(&mut self, last: ExpenseId);
}

/// Millisecond wall-clock ids, forced strictly increasing
///
/// Two calls within the same millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct ClockIds {
    last: u64,
}

impl ClockIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for ClockIds {
    fn next_id(&mut self) -> Option<ExpenseId> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last.checked_add(1)?);
        Some(ExpenseId(self.last))
    }

    fn last(&self) -> u64 {
        self.last
    }

    fn resume_after(&mut self, last: ExpenseId) {
        self.last = self.last.max(last.0);
    }
}

/// Plain counter, starting at 1
#[derive(Debug, Default)]
pub struct SequentialIds {
    last: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter whose first id will be `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            last: first.saturating_sub(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Option<ExpenseId> {
        self.last = self.last.checked_add(1)?;
        Some(ExpenseId(self.last))
    }

    fn last(&self) -> u64 {
        self.last
    }

    fn resume_after(&mut self, last: ExpenseId) {
        self.last = self.last.max(last.0);
    }
}
