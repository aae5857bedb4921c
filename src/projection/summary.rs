//! Run-rate and unit-economics figures derived from a ledger
//!
//! Ratios that are undefined for the given inputs (LTV with zero churn,
//! payback with no margin) are reported as `None`, which serializes to
//! `null`. They are never reported as zero or infinity.

use super::ledger::MonthlyLedgerRow;
use super::MONTHS_PER_YEAR;
use crate::assumptions::AssumptionSet;
use serde::{Deserialize, Serialize};

/// Column-wise sums over every ledger row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub revenue: f64,
    pub cogs: f64,
    pub gross_profit: f64,
    pub cac_spend: f64,
    pub headcount_cost: f64,
    pub opex: f64,
    pub net: f64,
}

impl Totals {
    fn add(&mut self, row: &MonthlyLedgerRow) {
        self.revenue += row.revenue;
        self.cogs += row.cogs;
        self.gross_profit += row.gross_profit;
        self.cac_spend += row.cac_spend;
        self.headcount_cost += row.headcount_cost;
        self.opex += row.opex;
        self.net += row.net;
    }
}

/// Complete output of one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub rows: Vec<MonthlyLedgerRow>,
    pub totals: Totals,
    /// Customers at the end of the final month
    pub ending_customers: u64,
    /// Monthly recurring revenue at the end of the horizon
    pub mrr: f64,
    /// Annual recurring revenue (MRR x 12)
    pub arr: f64,
    /// First month whose cumulative net is >= 0. Later months may dip below
    /// zero again; this stays the first crossing.
    pub break_even_month: Option<u32>,
    /// Lifetime value; `None` when churn is zero
    pub ltv: Option<f64>,
    /// Months of gross margin needed to recover CAC; `None` without margin
    pub payback_months: Option<f64>,
    pub gross_margin_per_customer_per_month: f64,
    /// LTV divided by CAC; `None` when either is undefined or CAC is zero
    pub ltv_to_cac_ratio: Option<f64>,
    /// Deepest cumulative loss over the horizon (0 if never negative)
    pub peak_cumulative_burn: f64,
}

/// Summarize a ledger produced from `assumptions`
///
/// An empty ledger yields zero totals and the starting customer count.
pub fn summarize(rows: Vec<MonthlyLedgerRow>, assumptions: &AssumptionSet) -> ProjectionResult {
    let mut totals = Totals::default();
    for row in &rows {
        totals.add(row);
    }

    let ending_customers = rows
        .last()
        .map_or(assumptions.starting_customers, |row| row.ending_customers);
    let mrr = ending_customers as f64 * assumptions.price_per_account_per_month;
    let arr = mrr * MONTHS_PER_YEAR;

    let break_even_month = rows
        .iter()
        .find(|row| row.cumulative_net >= 0.0)
        .map(|row| row.month);

    let margin = assumptions.gross_margin_per_customer_per_month();

    // A vanishingly small divisor can still overflow; report that as undefined
    let ltv = if assumptions.monthly_churn_rate > 0.0 {
        finite(margin / assumptions.monthly_churn_rate)
    } else {
        None
    };

    let payback_months = if margin > 0.0 {
        finite(assumptions.cac_per_account / margin)
    } else {
        None
    };

    let ltv_to_cac_ratio = match ltv {
        Some(ltv) if assumptions.cac_per_account > 0.0 => finite(ltv / assumptions.cac_per_account),
        _ => None,
    };

    let peak_cumulative_burn = rows
        .iter()
        .map(|row| -row.cumulative_net)
        .fold(0.0, f64::max);

    ProjectionResult {
        rows,
        totals,
        ending_customers,
        mrr,
        arr,
        break_even_month,
        ltv,
        payback_months,
        gross_margin_per_customer_per_month: margin,
        ltv_to_cac_ratio,
        peak_cumulative_burn,
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::RawAssumptions;
    use crate::headcount::{HeadcountLine, HeadcountSchedule, Role};
    use crate::projection::ProjectionEngine;
    use approx::assert_relative_eq;

    fn assumptions(raw: RawAssumptions) -> AssumptionSet {
        AssumptionSet::clamp(&raw)
    }

    #[test]
    fn test_scenario_a_summary() {
        let a = assumptions(RawAssumptions {
            horizon_months: 3.0,
            price_per_account_per_month: 100.0,
            new_accounts_per_month: 10.0,
            ..Default::default()
        });
        let result = ProjectionEngine::new(a, HeadcountSchedule::default()).project();

        assert_eq!(result.totals.revenue, 6_000.0);
        assert_eq!(result.ending_customers, 30);
        assert_eq!(result.mrr, 3_000.0);
        assert_eq!(result.arr, 36_000.0);
        assert_eq!(result.break_even_month, Some(1));
        assert_eq!(result.ltv, None);
        assert_eq!(result.payback_months, Some(0.0));
        assert_eq!(result.peak_cumulative_burn, 0.0);
    }

    #[test]
    fn test_break_even_is_first_crossing() {
        // 10 customers at 100 = 1000/month of revenue. A one-off hire in
        // month 1 pushes the cumulative below zero until month 4, and a second
        // one in month 5 drags it negative again before month 6 recovers.
        let a = assumptions(RawAssumptions {
            horizon_months: 6.0,
            price_per_account_per_month: 100.0,
            starting_customers: 10.0,
            ..Default::default()
        });
        let headcount = HeadcountSchedule::new(vec![
            HeadcountLine::new(Role::Engineering, 1, 3_500.0, 1, Some(1)),
            HeadcountLine::new(Role::Sales, 1, 2_000.0, 5, Some(5)),
        ]);
        let result = ProjectionEngine::new(a, headcount).project();

        let cumulative: Vec<f64> = result.rows.iter().map(|r| r.cumulative_net).collect();
        assert_eq!(cumulative, vec![-2_500.0, -1_500.0, -500.0, 500.0, -500.0, 500.0]);
        assert_eq!(result.break_even_month, Some(4));
        assert_eq!(result.peak_cumulative_burn, 2_500.0);
    }

    #[test]
    fn test_never_breaks_even() {
        let a = assumptions(RawAssumptions {
            horizon_months: 12.0,
            price_per_account_per_month: 10.0,
            starting_customers: 5.0,
            fixed_monthly_cost: 1_000.0,
            ..Default::default()
        });
        let result = ProjectionEngine::new(a, HeadcountSchedule::default()).project();

        assert_eq!(result.break_even_month, None);
        assert_relative_eq!(result.peak_cumulative_burn, 950.0 * 12.0);
    }

    #[test]
    fn test_unit_economics() {
        let a = assumptions(RawAssumptions {
            horizon_months: 12.0,
            price_per_account_per_month: 100.0,
            starting_customers: 50.0,
            monthly_churn_pct: 5.0,
            cac_per_account: 400.0,
            cogs_pct: 20.0,
            ..Default::default()
        });
        let result = ProjectionEngine::new(a, HeadcountSchedule::default()).project();

        assert_relative_eq!(result.gross_margin_per_customer_per_month, 80.0, epsilon = 1e-9);
        assert_relative_eq!(result.ltv.unwrap(), 1_600.0, epsilon = 1e-9);
        assert_relative_eq!(result.payback_months.unwrap(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(result.ltv_to_cac_ratio.unwrap(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_churn_has_no_ltv() {
        let a = assumptions(RawAssumptions {
            price_per_account_per_month: 100.0,
            cac_per_account: 500.0,
            monthly_churn_pct: 0.0,
            ..Default::default()
        });
        let result = summarize(ProjectionEngine::new(a.clone(), HeadcountSchedule::default()).run(), &a);

        assert_eq!(result.ltv, None);
        assert_eq!(result.ltv_to_cac_ratio, None);
        assert_relative_eq!(result.payback_months.unwrap(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_margin_has_no_payback() {
        // 100% COGS leaves nothing to pay back acquisition with
        let a = assumptions(RawAssumptions {
            price_per_account_per_month: 100.0,
            cac_per_account: 500.0,
            monthly_churn_pct: 2.0,
            cogs_pct: 100.0,
            ..Default::default()
        });
        let result = summarize(ProjectionEngine::new(a.clone(), HeadcountSchedule::default()).run(), &a);

        assert_eq!(result.gross_margin_per_customer_per_month, 0.0);
        assert_eq!(result.payback_months, None);
        assert_eq!(result.ltv, Some(0.0));

        let free = assumptions(RawAssumptions { monthly_churn_pct: 2.0, ..Default::default() });
        let result = summarize(Vec::new(), &free);
        assert_eq!(result.payback_months, None);
    }

    #[test]
    fn test_overflowing_ratios_are_undefined() {
        let a = assumptions(RawAssumptions {
            price_per_account_per_month: 1e9,
            cac_per_account: 1e9,
            monthly_churn_pct: 1e-300,
            ..Default::default()
        });
        let result = summarize(Vec::new(), &a);
        assert!(a.monthly_churn_rate > 0.0);
        assert_eq!(result.ltv, None);
        assert_eq!(result.ltv_to_cac_ratio, None);

        let tiny_margin = assumptions(RawAssumptions {
            price_per_account_per_month: 1e-310,
            cac_per_account: 1e9,
            ..Default::default()
        });
        let result = summarize(Vec::new(), &tiny_margin);
        assert!(result.gross_margin_per_customer_per_month > 0.0);
        assert_eq!(result.payback_months, None);
    }

    #[test]
    fn test_empty_ledger() {
        let a = assumptions(RawAssumptions {
            price_per_account_per_month: 20.0,
            starting_customers: 15.0,
            ..Default::default()
        });
        let result = summarize(Vec::new(), &a);

        assert_eq!(result.totals, Totals::default());
        assert_eq!(result.ending_customers, 15);
        assert_eq!(result.mrr, 300.0);
        assert_eq!(result.break_even_month, None);
        assert_eq!(result.peak_cumulative_burn, 0.0);
    }

    #[test]
    fn test_totals_match_rows() {
        let a = assumptions(RawAssumptions {
            horizon_months: 24.0,
            price_per_account_per_month: 59.0,
            starting_customers: 20.0,
            new_accounts_per_month: 6.0,
            monthly_churn_pct: 4.0,
            sales_cycle_months: 2.0,
            cac_per_account: 250.0,
            cogs_pct: 15.0,
            fixed_monthly_cost: 2_500.0,
        });
        let headcount = HeadcountSchedule::new(vec![
            HeadcountLine::new(Role::Support, 1, 4_500.0, 6, None),
        ]);
        let result = ProjectionEngine::new(a, headcount).project();

        let revenue: f64 = result.rows.iter().map(|r| r.revenue).sum();
        let opex: f64 = result.rows.iter().map(|r| r.opex).sum();
        assert_relative_eq!(result.totals.revenue, revenue);
        assert_relative_eq!(result.totals.opex, opex);
        assert_relative_eq!(result.totals.headcount_cost, 4_500.0 * 19.0);
        assert_relative_eq!(
            result.totals.net,
            result.rows.last().unwrap().cumulative_net,
            epsilon = 1e-6
        );
        assert_relative_eq!(result.totals.gross_profit, result.totals.revenue - result.totals.cogs, epsilon = 1e-6);
    }

    #[test]
    fn test_json_field_names_and_nulls() {
        let a = assumptions(RawAssumptions {
            horizon_months: 3.0,
            price_per_account_per_month: 100.0,
            new_accounts_per_month: 10.0,
            ..Default::default()
        });
        let result = ProjectionEngine::new(a, HeadcountSchedule::default()).project();
        let json = serde_json::to_value(&result).unwrap();

        for key in [
            "rows",
            "totals",
            "endingCustomers",
            "mrr",
            "arr",
            "breakEvenMonth",
            "ltv",
            "paybackMonths",
            "grossMarginPerCustomerPerMonth",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json["ltv"].is_null());
        assert_eq!(json["breakEvenMonth"], 1);
        assert_eq!(json["rows"][2]["endingCustomers"], 30);
        assert_eq!(json["totals"]["grossProfit"], 6_000.0);
    }
}
