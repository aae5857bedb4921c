//! Monthly ledger rows and CSV export

use crate::error::InputResult;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One month of the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLedgerRow {
    /// Projection month (1-indexed)
    pub month: u32,

    // Customers
    pub starting_customers: u64,
    pub new_accounts_closed: u64,
    pub new_customers_activated: u64,
    pub churned_customers: u64,
    pub ending_customers: u64,

    // Income
    pub revenue: f64,
    pub cogs: f64,
    pub gross_profit: f64,

    // Operating expenses
    /// Acquisition spend, recognized in the month accounts close
    pub cac_spend: f64,
    pub headcount_cost: f64,
    /// People on payroll this month
    pub headcount: u32,
    /// Fixed cost + headcount cost + CAC spend
    pub opex: f64,

    pub net: f64,
    pub cumulative_net: f64,
}

/// CSV layout of a ledger row with an optional calendar label
// csv cannot serialize flattened structs, so the row columns are repeated here
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerRecord {
    period: Option<String>,
    month: u32,
    starting_customers: u64,
    new_accounts_closed: u64,
    new_customers_activated: u64,
    churned_customers: u64,
    ending_customers: u64,
    revenue: f64,
    cogs: f64,
    gross_profit: f64,
    cac_spend: f64,
    headcount_cost: f64,
    headcount: u32,
    opex: f64,
    net: f64,
    cumulative_net: f64,
}

impl LedgerRecord {
    fn new(row: &MonthlyLedgerRow, period: Option<String>) -> Self {
        Self {
            period,
            month: row.month,
            starting_customers: row.starting_customers,
            new_accounts_closed: row.new_accounts_closed,
            new_customers_activated: row.new_customers_activated,
            churned_customers: row.churned_customers,
            ending_customers: row.ending_customers,
            revenue: row.revenue,
            cogs: row.cogs,
            gross_profit: row.gross_profit,
            cac_spend: row.cac_spend,
            headcount_cost: row.headcount_cost,
            headcount: row.headcount,
            opex: row.opex,
            net: row.net,
            cumulative_net: row.cumulative_net,
        }
    }
}

/// Calendar label (`YYYY-MM`) of a projection month, with month 1 falling in
/// the month of `start`. Month 0 is not a projection month and has no label.
pub fn period_label(start: NaiveDate, month: u32) -> Option<String> {
    if month == 0 {
        return None;
    }
    let first_of_month = start.with_day(1)?;
    let date = first_of_month.checked_add_months(Months::new(month - 1))?;
    Some(date.format("%Y-%m").to_string())
}

/// Write ledger rows as CSV
///
/// The first column is `period`; it is filled only when `start_date` is given.
pub fn write_ledger_csv<W: Write>(
    rows: &[MonthlyLedgerRow],
    writer: W,
    start_date: Option<NaiveDate>,
) -> InputResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        let period = start_date.and_then(|start| period_label(start, row.month));
        csv_writer.serialize(LedgerRecord::new(row, period))?;
    }
    csv_writer.flush()?;
    Ok(())
}
