//! Spending Report
//!
//! Breaks spending down by category over a filter window.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{ExpenseCategory, LedgerRecord, Money};
use crate::services::ExpenseFilter;

/// Spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingByCategory {
    pub category: ExpenseCategory,
    pub total: Money,
    /// Number of expenses
    pub count: usize,
    /// Share of the report total, 0-100
    pub percentage: f64,
}

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub filter: ExpenseFilter,
    /// Date the filter window was evaluated against
    pub today: NaiveDate,
    /// Categories with spending, largest first
    pub categories: Vec<SpendingByCategory>,
    pub total_spending: Money,
    pub total_expenses: usize,
}

impl SpendingReport {
    /// Aggregate every expense `filter` selects
    ///
    /// Labels outside the known set count toward `Other`.
    pub fn generate(record: &LedgerRecord, filter: ExpenseFilter, today: NaiveDate) -> Self {
        let mut by_category: BTreeMap<ExpenseCategory, (Money, usize)> = BTreeMap::new();
        let mut total_spending = Money::zero();
        let mut total_expenses = 0;

        for expense in record.expenses.iter().filter(|e| filter.matches(e, today)) {
            let entry = by_category
                .entry(expense.kind())
                .or_insert((Money::zero(), 0));
            entry.0 += expense.amount;
            entry.1 += 1;
            total_spending += expense.amount;
            total_expenses += 1;
        }

        let mut categories: Vec<SpendingByCategory> = by_category
            .into_iter()
            .map(|(category, (total, count))| SpendingByCategory {
                category,
                total,
                count,
                percentage: share(total, total_spending),
            })
            .collect();

        // Most spending first, then display order
        categories.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));

        Self {
            filter,
            today,
            categories,
            total_spending,
            total_expenses,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Report: {} (as of {})\n",
            self.filter, self.today
        ));
        output.push_str(&"=".repeat(56));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>14} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(56));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<20} {:>14} {:>8} {:>7.1}%\n",
                row.category.to_string(),
                row.total.format_with_symbol(symbol),
                row.count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(56));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14} {:>8}\n",
            "TOTAL",
            self.total_spending.format_with_symbol(symbol),
            self.total_expenses
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TrackerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| TrackerError::Export(e.to_string());

        csv_writer
            .write_record(["Filter", "Category", "Amount", "Count", "Percentage"])
            .map_err(export_err)?;

        for row in &self.categories {
            csv_writer
                .write_record([
                    self.filter.label().to_string(),
                    row.category.label().to_string(),
                    format!("{:.2}", row.total.as_units()),
                    row.count.to_string(),
                    format!("{:.2}", row.percentage),
                ])
                .map_err(export_err)?;
        }

        csv_writer
            .write_record([
                self.filter.label().to_string(),
                "TOTAL".to_string(),
                format!("{:.2}", self.total_spending.as_units()),
                self.total_expenses.to_string(),
                "100.00".to_string(),
            ])
            .map_err(export_err)?;

        csv_writer
            .flush()
            .map_err(|e| TrackerError::Export(e.to_string()))
    }

    /// The `limit` categories with the most spending
    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }
}

fn share(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        0.0
    } else {
        part.cents() as f64 / total.cents() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_record() -> LedgerRecord {
        let entries = [
            (1, 3000, "food", date(2025, 6, 10)),
            (2, 1000, "food", date(2025, 6, 9)),
            (3, 4000, "bills", date(2025, 6, 1)),
            (4, 2000, "gym", date(2025, 6, 10)),
        ];
        LedgerRecord {
            allowance: Money::from_cents(100_000),
            goal: Money::zero(),
            expenses: entries
                .into_iter()
                .map(|(id, cents, category, on)| {
                    Expense::new(ExpenseId::new(id), Money::from_cents(cents), category, on)
                })
                .collect(),
        }
    }

    #[test]
    fn test_generate_all() {
        let report = SpendingReport::generate(&sample_record(), ExpenseFilter::All, date(2025, 6, 10));

        assert_eq!(report.total_spending, Money::from_cents(10_000));
        assert_eq!(report.total_expenses, 4);

        let order: Vec<ExpenseCategory> = report.categories.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![ExpenseCategory::Food, ExpenseCategory::Bills, ExpenseCategory::Other]
        );
        assert_eq!(report.categories[0].count, 2);
        assert_eq!(report.categories[0].percentage, 40.0);
        assert_eq!(report.categories[2].total, Money::from_cents(2000));
    }

    #[test]
    fn test_generate_today_only() {
        let report = SpendingReport::generate(&sample_record(), ExpenseFilter::Today, date(2025, 6, 10));
        assert_eq!(report.total_spending, Money::from_cents(5000));
        assert_eq!(report.top_categories(1)[0].category, ExpenseCategory::Food);
        assert_eq!(report.top_categories(10).len(), 2);
    }

    #[test]
    fn test_empty_report() {
        let report = SpendingReport::generate(&LedgerRecord::default(), ExpenseFilter::All, date(2025, 6, 10));
        assert!(report.categories.is_empty());
        assert!(report.format_terminal("$").contains("No expenses in this period."));
    }

    #[test]
    fn test_format_terminal() {
        let report = SpendingReport::generate(&sample_record(), ExpenseFilter::All, date(2025, 6, 10));
        let output = report.format_terminal("$");

        assert!(output.contains("Spending Report: all"));
        assert!(output.contains("Food"));
        assert!(output.contains("$40.00"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("$100.00"));
    }

    #[test]
    fn test_export_csv() {
        let report = SpendingReport::generate(&sample_record(), ExpenseFilter::All, date(2025, 6, 10));
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Filter,Category,Amount,Count,Percentage");
        assert_eq!(lines[1], "all,food,40.00,2,40.00");
        assert_eq!(lines.last(), Some(&"all,TOTAL,100.00,4,100.00"));
    }
}
