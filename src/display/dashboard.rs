//! Dashboard display formatting

use super::DisplayStyle;
use crate::models::Money;
use crate::services::{Dashboard, SavingsProgress};

/// Render the dashboard summary
pub fn format_dashboard(dashboard: &Dashboard, style: &DisplayStyle) -> String {
    let mut output = String::new();

    let title = format!("Dashboard ({})", style.date(dashboard.today));
    output.push_str(&title);
    output.push('\n');
    output.push_str(&"=".repeat(title.len()));
    output.push('\n');

    output.push_str(&format!("Allowance:     {}\n", style.money(dashboard.total_allowance)));
    output.push_str(&format!("Spent:         {}\n", style.money(dashboard.total_spent)));
    output.push_str(&format!("Balance:       {}\n", style.money(dashboard.balance)));
    output.push_str(&format!(
        "Days left:     {} of {}\n",
        dashboard.remaining_days.max(0),
        dashboard.days_in_month
    ));
    output.push_str(&format!(
        "Daily budget:  {} (ideal {})\n",
        style.rate(dashboard.daily_budget),
        style.rate(dashboard.ideal_daily)
    ));
    output.push_str(&format!(
        "Status:        {} [{}]\n",
        dashboard.health,
        dashboard.status_color()
    ));

    match &dashboard.savings {
        SavingsProgress::NoGoal => {
            output.push_str(&format!("Savings:       {}\n", dashboard.savings.text(style.symbol)));
        }
        progress @ SavingsProgress::Tracking { .. } => {
            output.push_str(&format!(
                "Savings:       {} ({:.0}%)\n",
                progress.text(style.symbol),
                progress.percentage()
            ));
            output.push_str(&format!("               {}\n", progress_bar(progress.percentage(), 20)));
        }
    }

    output
}

/// Fixed-width bar for a 0-100 percentage
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Rates are rounded to the cent for display only
pub(super) fn rate_as_money(rate: f64) -> Money {
    Money::from_units(rate).unwrap_or_default()
}
