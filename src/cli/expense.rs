//! Expense CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list, DisplayStyle};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ExpenseCategory, ExpenseId};
use crate::services::{ExpenseFilter, LedgerStore, NewExpense};
use crate::storage::LedgerPersistence;

use super::{parse_amount, parse_date};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g. 12.50)
        amount: String,

        /// Category (food, transport, entertainment, stationary, bills, shopping, other)
        #[arg(short, long, default_value = "other")]
        category: String,

        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List expenses, newest first
    #[command(alias = "ls")]
    List {
        /// all, today or week
        #[arg(short, long, default_value = "all")]
        filter: ExpenseFilter,

        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// List the known categories
    Categories,
}

/// Handle an expense command
pub fn handle_expense_command<P: LedgerPersistence>(
    store: &mut LedgerStore<P>,
    settings: &Settings,
    today: NaiveDate,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let style = DisplayStyle::from_settings(settings);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            note,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => today,
            };

            let expense = store.add_expense(NewExpense {
                amount,
                category,
                date: Some(date),
                note,
            })?;

            println!("Added expense {}", expense.id);
            print!("{}", format_expense_details(&expense, &style));
        }

        ExpenseCommands::List { filter, limit } => {
            let mut expenses = filter.apply(&store.snapshot().expenses, today);
            let total = expenses.len();
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }

            print!("{}", format_expense_list(&expenses, &style));
            if !expenses.is_empty() {
                let sum = expenses.iter().map(|e| e.amount).sum();
                println!();
                println!(
                    "Showing {} of {} expense(s) ({}), total {}",
                    expenses.len(),
                    total,
                    filter,
                    style.money(sum)
                );
            }
        }

        ExpenseCommands::Show { id } => {
            let id = parse_id(&id)?;
            let expense = store
                .find(id)
                .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;
            print!("{}", format_expense_details(expense, &style));
        }

        ExpenseCommands::Delete { id, force } => {
            let id = parse_id(&id)?;
            let expense = store
                .find(id)
                .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;

            if !force {
                println!("About to delete:");
                print!("{}", format_expense_details(expense, &style));
                println!();
                println!("To proceed, run again with --force flag:");
                println!("  allowance expense delete {} --force", id);
                return Ok(());
            }

            if let Some(removed) = store.remove_expense(id)? {
                println!("Deleted expense {} ({})", removed.id, style.money(removed.amount));
            }
        }

        ExpenseCommands::Categories => {
            for category in ExpenseCategory::ALL {
                println!("{:<15} {}", category.label(), category);
            }
        }
    }

    Ok(())
}

fn parse_id(input: &str) -> TrackerResult<ExpenseId> {
    input
        .parse()
        .map_err(|_| TrackerError::expense_not_found(input.trim()))
}
