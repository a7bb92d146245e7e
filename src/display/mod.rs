//! Display formatting for terminal output
//!
//! Plain-text rendering of the dashboard and expense lists. Currency symbol
//! and date format come from [`Settings`](crate::config::Settings).

pub mod dashboard;
pub mod expense;

pub use dashboard::{format_dashboard, progress_bar};
pub use expense::{format_expense_details, format_expense_list, format_expense_row};

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::Money;

/// Symbol and date format used when rendering
#[derive(Debug, Clone, Copy)]
pub struct DisplayStyle<'a> {
    pub symbol: &'a str,
    pub date_format: &'a str,
}

impl<'a> DisplayStyle<'a> {
    /// Falls back to ISO dates if the configured format is not valid strftime
    pub fn from_settings(settings: &'a Settings) -> Self {
        let date_format = if is_valid_date_format(&settings.date_format) {
            settings.date_format.as_str()
        } else {
            "%Y-%m-%d"
        };
        Self {
            symbol: &settings.currency_symbol,
            date_format,
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(self.symbol)
    }

    /// A per-day rate, rounded to the cent
    pub fn rate(&self, rate: f64) -> String {
        self.money(dashboard::rate_as_money(rate))
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(self.date_format).to_string()
    }
}

impl Default for DisplayStyle<'static> {
    fn default() -> Self {
        Self {
            symbol: "$",
            date_format: "%Y-%m-%d",
        }
    }
}

fn is_valid_date_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_settings() {
        let settings = Settings {
            currency_symbol: "£".into(),
            date_format: "%d.%m.%Y".into(),
            ..Settings::default()
        };
        let style = DisplayStyle::from_settings(&settings);
        assert_eq!(style.money(Money::from_cents(505)), "£5.05");
        assert_eq!(style.date(NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()), "09.01.2025");
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let settings = Settings {
            date_format: "%Q%".into(),
            ..Settings::default()
        };
        let style = DisplayStyle::from_settings(&settings);
        assert_eq!(style.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_rate_rounds_to_cent() {
        assert_eq!(DisplayStyle::default().rate(34.4827), "$34.48");
    }
}
