//! CSV Export
//!
//! One row per expense, newest first, spreadsheet-compatible.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, LedgerRecord};
use crate::services::ExpenseFilter;

#[derive(Debug, Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Note")]
    note: &'a str,
}

impl<'a> From<&'a Expense> for ExpenseRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id.get(),
            date: expense.date,
            category: &expense.category,
            amount: format!("{:.2}", expense.amount.as_units()),
            note: &expense.note,
        }
    }
}

/// Export the expenses `filter` selects to CSV
pub fn export_expenses_csv<W: Write>(
    record: &LedgerRecord,
    filter: ExpenseFilter,
    today: NaiveDate,
    writer: &mut W,
) -> TrackerResult<usize> {
    let expenses = filter.apply(&record.expenses, today);

    let mut csv_writer = csv::Writer::from_writer(writer);
    if expenses.is_empty() {
        // serialize() only emits the header alongside the first row
        csv_writer
            .write_record(["ID", "Date", "Category", "Amount", "Note"])
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }
    for expense in &expenses {
        csv_writer
            .serialize(ExpenseRow::from(expense))
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(expenses.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_record() -> LedgerRecord {
        LedgerRecord {
            allowance: Money::from_cents(100_000),
            goal: Money::zero(),
            expenses: vec![
                Expense::new(ExpenseId::new(1), Money::from_cents(450), "food", date(2025, 6, 1))
                    .with_note("lunch, with friends"),
                Expense::new(ExpenseId::new(2), Money::from_cents(1200), "transport", date(2025, 6, 8)),
            ],
        }
    }

    #[test]
    fn test_export_expenses_csv() {
        let mut output = Vec::new();
        let count =
            export_expenses_csv(&sample_record(), ExpenseFilter::All, date(2025, 6, 8), &mut output).unwrap();
        assert_eq!(count, 2);

        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();
        assert_eq!(lines[0], "ID,Date,Category,Amount,Note");
        assert_eq!(lines[1], "2,2025-06-08,transport,12.00,");
        assert_eq!(lines[2], "1,2025-06-01,food,4.50,\"lunch, with friends\"");
    }

    #[test]
    fn test_export_filtered_to_nothing() {
        let mut output = Vec::new();
        let count =
            export_expenses_csv(&sample_record(), ExpenseFilter::Today, date(2025, 7, 1), &mut output).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(output).unwrap(), "ID,Date,Category,Amount,Note\n");
    }
}
