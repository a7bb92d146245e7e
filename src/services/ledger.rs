//! Ledger store
//!
//! Owns the in-memory [`LedgerRecord`] and is the only writer to it. Every
//! mutation validates its input, persists the next record, and only then
//! replaces the in-memory copy, so a rejected or failed mutation leaves the
//! store exactly as it was.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::audit::{AuditLogger, LedgerChange};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, ExpenseCategory, ExpenseId, IdGenerator, LedgerRecord, Money};
use crate::storage::LedgerPersistence;

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: Money,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl NewExpense {
    pub fn new(amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.into(),
            date: Some(date),
            note: None,
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Explicitly owned ledger state plus the slot it persists to
pub struct LedgerStore<P: LedgerPersistence> {
    persistence: P,
    ids: Box<dyn IdGenerator>,
    record: LedgerRecord,
    audit: Option<AuditLogger>,
    strict_categories: bool,
}

impl<P: LedgerPersistence> LedgerStore<P> {
    /// Load the record from `persistence` (zero defaults if none)
    pub fn open(persistence: P, ids: impl IdGenerator + 'static) -> Self {
        let record = persistence.load();
        Self::with_record(persistence, ids, record)
    }

    /// Start from an injected record instead of loading one
    pub fn with_record(persistence: P, ids: impl IdGenerator + 'static, record: LedgerRecord) -> Self {
        let mut ids: Box<dyn IdGenerator> = Box::new(ids);
        if let Some(max) = record.max_id() {
            ids.resume_after(max);
        }

        debug!(
            expenses = record.expenses.len(),
            allowance = %record.allowance,
            "ledger store opened"
        );

        Self {
            persistence,
            ids,
            record,
            audit: None,
            strict_categories: false,
        }
    }

    /// Record every committed mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Reject categories outside [`ExpenseCategory::ALL`]
    pub fn strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = strict;
        self
    }

    /// Read-only view of the current record
    pub fn snapshot(&self) -> &LedgerRecord {
        &self.record
    }

    pub fn find(&self, id: ExpenseId) -> Option<&Expense> {
        self.record.find(id)
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Replace the allowance
    pub fn set_allowance(&mut self, amount: Money) -> TrackerResult<()> {
        require_positive("allowance", amount)?;

        let before = self.record.allowance;
        let mut next = self.record.clone();
        next.allowance = amount;
        self.commit(next)?;

        info!(%before, after = %amount, "allowance updated");
        self.audit(LedgerChange::AllowanceSet {
            before,
            after: amount,
        });
        Ok(())
    }

    /// Replace the savings goal
    pub fn set_goal(&mut self, amount: Money) -> TrackerResult<()> {
        require_positive("goal", amount)?;

        let before = self.record.goal;
        let mut next = self.record.clone();
        next.goal = amount;
        self.commit(next)?;

        info!(%before, after = %amount, "goal updated");
        self.audit(LedgerChange::GoalSet {
            before,
            after: amount,
        });
        Ok(())
    }

    /// Append a new expense with a fresh id
    pub fn add_expense(&mut self, input: NewExpense) -> TrackerResult<Expense> {
        require_positive("expense amount", input.amount)?;
        let date = input
            .date
            .ok_or_else(|| TrackerError::InvalidDate("an expense needs a date".into()))?;
        let category = self.normalize_category(&input.category)?;

        let id = self.fresh_id()?;
        let expense = Expense::new(id, input.amount, category, date)
            .with_note(input.note.unwrap_or_default().trim());

        let mut next = self.record.clone();
        next.expenses.push(expense.clone());
        self.commit(next)?;

        info!(
            id = %expense.id,
            amount = %expense.amount,
            category = %expense.category,
            date = %expense.date,
            "expense added"
        );
        self.audit(LedgerChange::ExpenseAdded {
            expense: expense.clone(),
        });
        Ok(expense)
    }

    /// Remove the expense with `id`; absent ids are a no-op
    pub fn remove_expense(&mut self, id: ExpenseId) -> TrackerResult<Option<Expense>> {
        let Some(index) = self.record.expenses.iter().position(|e| e.id == id) else {
            debug!(%id, "remove requested for unknown expense");
            return Ok(None);
        };

        let mut next = self.record.clone();
        let removed = next.expenses.remove(index);
        self.commit(next)?;

        info!(%id, amount = %removed.amount, "expense removed");
        self.audit(LedgerChange::ExpenseRemoved {
            expense: removed.clone(),
        });
        Ok(Some(removed))
    }

    /// Wipe allowance, goal and expenses back to zero defaults
    pub fn reset(&mut self) -> TrackerResult<()> {
        let before = self.record.clone();
        self.commit(LedgerRecord::default())?;

        info!(expenses = before.expenses.len(), "ledger reset");
        self.audit(LedgerChange::Reset {
            allowance: before.allowance,
            goal: before.goal,
            expenses: before.expenses.len(),
        });
        Ok(())
    }

    fn commit(&mut self, next: LedgerRecord) -> TrackerResult<()> {
        self.persistence.save(&next)?;
        self.record = next;
        Ok(())
    }

    fn fresh_id(&mut self) -> TrackerResult<ExpenseId> {
        loop {
            let id = self
                .ids
                .next_id()
                .ok_or_else(|| TrackerError::IdsExhausted(self.ids.last()))?;
            if !self.record.contains(id) {
                return Ok(id);
            }
        }
    }

    fn normalize_category(&self, raw: &str) -> TrackerResult<String> {
        let label = raw.trim().to_lowercase();
        if label.is_empty() {
            return Ok(ExpenseCategory::Other.label().to_string());
        }

        match ExpenseCategory::from_label(&label) {
            Some(known) => Ok(known.label().to_string()),
            None if self.strict_categories => Err(TrackerError::InvalidCategory(format!(
                "'{}' is not one of: {}",
                raw.trim(),
                ExpenseCategory::ALL.map(|c| c.label()).join(", ")
            ))),
            None => Ok(label),
        }
    }

    fn audit(&self, change: LedgerChange) {
        let Some(logger) = &self.audit else {
            return;
        };
        // Ledger already committed; audit failures are logged, not returned
        if let Err(e) = logger.record(change) {
            warn!(error = %e, "failed to write audit entry");
        }
    }
}

fn require_positive(what: &str, amount: Money) -> TrackerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(TrackerError::InvalidAmount(format!(
            "{} must be greater than zero, got {}",
            what, amount
        )))
    }
}
