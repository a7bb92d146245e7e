//! Expense filter and newest-first ordering

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::models::Expense;

/// Which expenses a list or report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseFilter {
    #[default]
    All,
    /// Dated exactly today
    Today,
    /// Dated on or after seven days ago, future dates included
    Week,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Today => expense.date == today,
            Self::Week => expense.date >= week_start(today),
        }
    }

    /// Matching expenses, newest first
    pub fn apply(&self, expenses: &[Expense], today: NaiveDate) -> Vec<Expense> {
        let mut selected: Vec<Expense> = expenses
            .iter()
            .filter(|e| self.matches(e, today))
            .cloned()
            .collect();
        sort_newest_first(&mut selected);
        selected
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for ExpenseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" | "this-week" | "thisweek" => Ok(Self::Week),
            other => Err(format!(
                "unknown filter '{}' (expected all, today or week)",
                other
            )),
        }
    }
}

/// Sort by date descending; equal dates put the larger id first
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}

fn week_start(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: u64, on: NaiveDate) -> Expense {
        Expense::new(ExpenseId::new(id), Money::from_cents(100), "food", on)
    }

    fn ids(expenses: &[Expense]) -> Vec<u64> {
        expenses.iter().map(|e| e.id.get()).collect()
    }

    #[test]
    fn test_parse() {
        assert_eq!("all".parse::<ExpenseFilter>().unwrap(), ExpenseFilter::All);
        assert_eq!(" Today ".parse::<ExpenseFilter>().unwrap(), ExpenseFilter::Today);
        assert_eq!("this-week".parse::<ExpenseFilter>().unwrap(), ExpenseFilter::Week);
        assert_eq!("WEEK".parse::<ExpenseFilter>().unwrap(), ExpenseFilter::Week);
        assert!("month".parse::<ExpenseFilter>().is_err());
    }

    #[test]
    fn test_all_sorts_newest_first() {
        let expenses = vec![
            expense(1, date(2025, 6, 3)),
            expense(2, date(2025, 6, 10)),
            expense(3, date(2025, 5, 28)),
        ];

        let result = ExpenseFilter::All.apply(&expenses, date(2025, 6, 10));
        assert_eq!(ids(&result), vec![2, 1, 3]);
    }

    #[test]
    fn test_today_keeps_every_same_day_entry() {
        let today = date(2025, 6, 10);
        let expenses = vec![
            expense(1, date(2025, 6, 9)),
            expense(2, today),
            expense(3, date(2025, 6, 11)),
            expense(4, today),
        ];

        let result = ExpenseFilter::Today.apply(&expenses, today);
        assert_eq!(ids(&result), vec![4, 2]);
        assert!(result.iter().all(|e| e.date == today));
    }

    #[test]
    fn test_week_bounds() {
        let today = date(2025, 6, 10);
        let expenses = vec![
            expense(1, date(2025, 6, 2)),
            expense(2, date(2025, 6, 3)),
            expense(3, today),
            expense(4, date(2025, 6, 20)),
        ];

        let result = ExpenseFilter::Week.apply(&expenses, today);
        assert_eq!(ids(&result), vec![4, 3, 2]);
    }

    #[test]
    fn test_week_crosses_month_boundary() {
        let today = date(2025, 3, 2);
        let expenses = vec![expense(1, date(2025, 2, 23)), expense(2, date(2025, 2, 22))];
        assert_eq!(ids(&ExpenseFilter::Week.apply(&expenses, today)), vec![1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(ExpenseFilter::Week.apply(&[], date(2025, 6, 10)).is_empty());
    }
}
