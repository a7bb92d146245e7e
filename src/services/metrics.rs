//! Metrics engine
//!
//! Pure functions over a [`LedgerRecord`] and a calendar date. Totals stay in
//! [`Money`]; per-day rates and the savings percentage are `f64` currency units.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::models::{LedgerRecord, Money};

/// Display color paired with a health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Gray,
    Red,
    Orange,
    Green,
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Green => "green",
        };
        f.write_str(name)
    }
}

/// Budget health, evaluated in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// No allowance configured yet
    SetAllowance,
    /// Overspent
    Critical,
    /// Daily budget below half of the ideal pace
    Tight,
    /// At or above the ideal pace
    Healthy,
    Careful,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SetAllowance => "Set Allowance",
            Self::Critical => "Critical",
            Self::Tight => "Tight",
            Self::Healthy => "Healthy",
            Self::Careful => "Careful",
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            Self::SetAllowance => StatusColor::Gray,
            Self::Critical => StatusColor::Red,
            Self::Tight | Self::Careful => StatusColor::Orange,
            Self::Healthy => StatusColor::Green,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress toward the savings goal, using the balance as the saved amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SavingsProgress {
    NoGoal,
    Tracking {
        /// Balance clamped at zero
        saved: Money,
        goal: Money,
        /// Always within `0.0..=100.0`
        percentage: f64,
    },
}

impl SavingsProgress {
    pub fn percentage(&self) -> f64 {
        match self {
            Self::NoGoal => 0.0,
            Self::Tracking { percentage, .. } => *percentage,
        }
    }

    pub fn text(&self, symbol: &str) -> String {
        match self {
            Self::NoGoal => "No goal set".to_string(),
            Self::Tracking { saved, goal, .. } => format!(
                "{} saved of {}",
                saved.format_with_symbol(symbol),
                goal.format_with_symbol(symbol)
            ),
        }
    }
}

/// Sum of every expense, regardless of date
pub fn total_spent(record: &LedgerRecord) -> Money {
    record.total_spent()
}

pub fn balance(record: &LedgerRecord) -> Money {
    record.allowance - total_spent(record)
}

/// Number of days in `today`'s calendar month
pub fn days_in_month(today: NaiveDate) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| today.with_day(day).is_some())
        .unwrap_or(28)
}

/// Days left after today; zero on the last day of the month
pub fn remaining_days(today: NaiveDate) -> i64 {
    i64::from(days_in_month(today)) - i64::from(today.day())
}

/// Balance spread over the remaining days, treating fewer than one day as one
pub fn daily_budget(balance: Money, remaining_days: i64) -> f64 {
    balance.as_units() / remaining_days.max(1) as f64
}

/// Allowance spread evenly over the whole month
pub fn ideal_daily(allowance: Money, days_in_month: u32) -> f64 {
    allowance.as_units() / f64::from(days_in_month.max(1))
}

pub fn health_status(allowance: Money, balance: Money, daily_budget: f64, ideal_daily: f64) -> HealthStatus {
    if allowance.is_zero() {
        HealthStatus::SetAllowance
    } else if balance.is_negative() {
        HealthStatus::Critical
    } else if daily_budget < ideal_daily * 0.5 {
        HealthStatus::Tight
    } else if daily_budget >= ideal_daily {
        HealthStatus::Healthy
    } else {
        HealthStatus::Careful
    }
}

pub fn savings_progress(balance: Money, goal: Money) -> SavingsProgress {
    if !goal.is_positive() {
        return SavingsProgress::NoGoal;
    }

    let percentage = (balance.as_units() / goal.as_units() * 100.0).clamp(0.0, 100.0);
    SavingsProgress::Tracking {
        saved: balance.non_negative(),
        goal,
        percentage,
    }
}

/// Everything the dashboard shows, computed from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub total_allowance: Money,
    pub total_spent: Money,
    pub balance: Money,
    pub days_in_month: u32,
    pub remaining_days: i64,
    pub daily_budget: f64,
    pub ideal_daily: f64,
    pub health: HealthStatus,
    pub savings: SavingsProgress,
}

impl Dashboard {
    pub fn compute(record: &LedgerRecord, today: NaiveDate) -> Self {
        let spent = total_spent(record);
        let balance = record.allowance - spent;
        let days = days_in_month(today);
        let remaining = remaining_days(today);
        let daily = daily_budget(balance, remaining);
        let ideal = ideal_daily(record.allowance, days);

        Self {
            today,
            total_allowance: record.allowance,
            total_spent: spent,
            balance,
            days_in_month: days,
            remaining_days: remaining,
            daily_budget: daily,
            ideal_daily: ideal,
            health: health_status(record.allowance, balance, daily, ideal),
            savings: savings_progress(balance, record.goal),
        }
    }

    pub fn status_color(&self) -> StatusColor {
        self.health.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn units(n: i64) -> Money {
        Money::from_cents(n * 100)
    }

    fn record(allowance: i64, goal: i64, spent: &[i64]) -> LedgerRecord {
        LedgerRecord {
            allowance: units(allowance),
            goal: units(goal),
            expenses: spent
                .iter()
                .enumerate()
                .map(|(i, amount)| {
                    Expense::new(ExpenseId::new(i as u64 + 1), units(*amount), "food", date(2025, 6, 1))
                })
                .collect(),
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2025, 6, 15)), 30);
        assert_eq!(days_in_month(date(2025, 7, 1)), 31);
        assert_eq!(days_in_month(date(2025, 2, 10)), 28);
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2025, 12, 31)), 31);
    }

    #[test]
    fn test_remaining_days_reaches_zero() {
        assert_eq!(remaining_days(date(2025, 6, 1)), 29);
        assert_eq!(remaining_days(date(2025, 6, 30)), 0);
    }

    #[test]
    fn test_daily_budget_treats_zero_days_as_one() {
        assert_eq!(daily_budget(units(50), 0), 50.0);
        assert_eq!(daily_budget(units(50), -2), 50.0);
        assert_eq!(daily_budget(units(50), 5), 10.0);
    }

    #[test]
    fn test_scenario_healthy_start_of_month() {
        let dashboard = Dashboard::compute(&record(1000, 500, &[]), date(2025, 6, 1));

        assert_eq!(dashboard.balance, units(1000));
        assert_eq!(dashboard.remaining_days, 29);
        assert!((dashboard.daily_budget - 34.48).abs() < 0.01);
        assert!((dashboard.ideal_daily - 33.33).abs() < 0.01);
        assert_eq!(dashboard.health, HealthStatus::Healthy);
        assert_eq!(dashboard.status_color(), StatusColor::Green);
        assert_eq!(dashboard.savings.percentage(), 100.0);
    }

    #[test]
    fn test_scenario_overspent_is_critical() {
        for today in [date(2025, 6, 1), date(2025, 6, 15), date(2025, 6, 30)] {
            let dashboard = Dashboard::compute(&record(1000, 0, &[1200]), today);
            assert_eq!(dashboard.balance, units(-200));
            assert_eq!(dashboard.health, HealthStatus::Critical);
            assert_eq!(dashboard.health.color(), StatusColor::Red);
        }
    }

    #[test]
    fn test_scenario_no_allowance() {
        let dashboard = Dashboard::compute(&record(0, 0, &[10, 20]), date(2025, 6, 10));
        assert_eq!(dashboard.health, HealthStatus::SetAllowance);
        assert_eq!(dashboard.health.label(), "Set Allowance");
        assert_eq!(dashboard.status_color(), StatusColor::Gray);
    }

    #[test]
    fn test_tight_and_careful() {
        // June 16: 14 days left, ideal pace 1000/30 = 33.33/day
        let today = date(2025, 6, 16);

        let tight = Dashboard::compute(&record(1000, 0, &[800]), today);
        assert_eq!(tight.health, HealthStatus::Tight);
        assert_eq!(tight.health.color(), StatusColor::Orange);

        let careful = Dashboard::compute(&record(1000, 0, &[600]), today);
        assert_eq!(careful.health, HealthStatus::Careful);
        assert_eq!(careful.health.color(), StatusColor::Orange);
    }

    #[test]
    fn test_health_boundaries() {
        assert_eq!(health_status(units(30), units(1), 15.0, 30.0), HealthStatus::Careful);
        assert_eq!(health_status(units(30), units(1), 14.99, 30.0), HealthStatus::Tight);
        assert_eq!(health_status(units(30), units(1), 30.0, 30.0), HealthStatus::Healthy);
        assert_eq!(health_status(units(30), Money::zero(), 0.0, 1.0), HealthStatus::Tight);
    }

    #[test]
    fn test_health_is_always_defined() {
        let labels = ["Set Allowance", "Critical", "Tight", "Healthy", "Careful"];
        for allowance in [0, 1, 100, 1000] {
            for spent in [0, 1, 99, 100, 5000] {
                for day in [1, 14, 28] {
                    let dashboard = Dashboard::compute(&record(allowance, 0, &[spent]), date(2025, 2, day));
                    assert!(labels.contains(&dashboard.health.label()));
                }
            }
        }
    }

    #[test]
    fn test_savings_progress() {
        assert_eq!(savings_progress(units(100), Money::zero()), SavingsProgress::NoGoal);

        let half = savings_progress(units(250), units(500));
        assert_eq!(half.percentage(), 50.0);
        assert_eq!(half.text("$"), "$250.00 saved of $500.00");

        let negative = savings_progress(units(-40), units(500));
        assert_eq!(negative.percentage(), 0.0);
        assert_eq!(
            negative,
            SavingsProgress::Tracking {
                saved: Money::zero(),
                goal: units(500),
                percentage: 0.0
            }
        );
    }

    #[test]
    fn test_savings_percentage_is_bounded() {
        for balance in [-1_000_000, -1, 0, 1, 499, 500, 501, 1_000_000] {
            for goal in [1, 7, 500, 100_000] {
                let pct = savings_progress(Money::from_cents(balance), Money::from_cents(goal)).percentage();
                assert!((0.0..=100.0).contains(&pct), "{} / {} -> {}", balance, goal, pct);
            }
        }
    }

    #[test]
    fn test_no_goal_text() {
        assert_eq!(SavingsProgress::NoGoal.text("$"), "No goal set");
        assert_eq!(SavingsProgress::NoGoal.percentage(), 0.0);
    }

    #[test]
    fn test_total_spent_is_lifetime() {
        let mut rec = record(100, 0, &[5]);
        rec.expenses.push(Expense::new(ExpenseId::new(9), units(7), "bills", date(2019, 1, 1)));
        assert_eq!(total_spent(&rec), units(12));
        assert_eq!(balance(&rec), units(88));
    }
}
