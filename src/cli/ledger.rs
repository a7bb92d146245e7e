//! Allowance, goal, reset and history commands

use crate::audit::AuditLogger;
use crate::config::{Settings, TrackerPaths};
use crate::display::DisplayStyle;
use crate::error::TrackerResult;
use crate::services::LedgerStore;
use crate::storage::LedgerPersistence;

use super::parse_amount;

pub fn handle_set_allowance<P: LedgerPersistence>(
    store: &mut LedgerStore<P>,
    settings: &Settings,
    amount: &str,
) -> TrackerResult<()> {
    let amount = parse_amount(amount)?;
    store.set_allowance(amount)?;

    let style = DisplayStyle::from_settings(settings);
    println!("Allowance set to {}", style.money(amount));
    Ok(())
}

pub fn handle_set_goal<P: LedgerPersistence>(
    store: &mut LedgerStore<P>,
    settings: &Settings,
    amount: &str,
) -> TrackerResult<()> {
    let amount = parse_amount(amount)?;
    store.set_goal(amount)?;

    let style = DisplayStyle::from_settings(settings);
    println!("Savings goal set to {}", style.money(amount));
    Ok(())
}

/// Wipe the ledger; without `force` only describes what would go
pub fn handle_reset<P: LedgerPersistence>(
    store: &mut LedgerStore<P>,
    settings: &Settings,
    force: bool,
) -> TrackerResult<()> {
    let style = DisplayStyle::from_settings(settings);
    let snapshot = store.snapshot();

    if !force {
        println!("This will clear:");
        println!("  Allowance: {}", style.money(snapshot.allowance));
        println!("  Goal:      {}", style.money(snapshot.goal));
        println!("  Expenses:  {}", snapshot.expenses.len());
        println!();
        println!("To proceed, run again with --force flag:");
        println!("  allowance reset --force");
        return Ok(());
    }

    store.reset()?;
    println!("Ledger reset.");
    Ok(())
}

/// Print the most recent audit entries, newest last
pub fn handle_history(paths: &TrackerPaths, limit: usize) -> TrackerResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.tail(limit)?;

    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }
    Ok(())
}
