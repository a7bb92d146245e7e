//! Dashboard and spending report commands

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::{format_dashboard, DisplayStyle};
use crate::error::{TrackerError, TrackerResult};
use crate::reports::SpendingReport;
use crate::services::{Dashboard, ExpenseFilter, LedgerStore};
use crate::storage::LedgerPersistence;

/// Print the dashboard, or its JSON form with `json`
pub fn handle_status<P: LedgerPersistence>(
    store: &LedgerStore<P>,
    settings: &Settings,
    today: NaiveDate,
    json: bool,
) -> TrackerResult<()> {
    let dashboard = Dashboard::compute(store.snapshot(), today);

    if json {
        let rendered = serde_json::to_string_pretty(&dashboard)
            .map_err(|e| TrackerError::Json(e.to_string()))?;
        println!("{}", rendered);
    } else {
        print!("{}", format_dashboard(&dashboard, &DisplayStyle::from_settings(settings)));
    }
    Ok(())
}

pub fn handle_report<P: LedgerPersistence>(
    store: &LedgerStore<P>,
    settings: &Settings,
    today: NaiveDate,
    filter: ExpenseFilter,
) -> TrackerResult<()> {
    let report = SpendingReport::generate(store.snapshot(), filter, today);
    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}
