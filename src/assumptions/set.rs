//! Assumption records and range clamping
//!
//! `RawAssumptions` is what an editing surface produces: loose numbers with
//! churn and COGS given in percent. `AssumptionSet` is the validated form the
//! engine consumes. `AssumptionSet::clamp` is the only place values are
//! corrected; it never rejects input.

use log::debug;
use serde::{Deserialize, Serialize};

/// Shortest projection horizon in months
pub const MIN_HORIZON_MONTHS: u32 = 3;

/// Longest projection horizon in months
pub const MAX_HORIZON_MONTHS: u32 = 60;

/// Longest supported sales cycle in months
pub const MAX_SALES_CYCLE_MONTHS: u32 = 24;

/// Largest customer or account count accepted for a single field
///
/// Starting customers plus a full horizon of closes stays far below both
/// `u64::MAX` and the 2^53 limit of exact integers in `f64`.
pub const MAX_CUSTOMERS: u64 = 1_000_000_000;

/// Largest per-unit money amount (price, CAC, fixed cost, salary)
///
/// Products with `MAX_CUSTOMERS` and sums over the horizon stay finite.
pub const MAX_MONEY: f64 = 1e9;

/// Unvalidated assumptions as entered by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssumptions {
    /// Number of months to project
    #[serde(default = "default_horizon")]
    pub horizon_months: f64,

    /// Subscription price per account per month
    #[serde(default)]
    pub price_per_account_per_month: f64,

    /// Paying customers at the start of month 1
    #[serde(default)]
    pub starting_customers: f64,

    /// Accounts closed each month (flat across the horizon)
    #[serde(default)]
    pub new_accounts_per_month: f64,

    /// Monthly churn in percent (5.0 = 5%)
    #[serde(default)]
    pub monthly_churn_pct: f64,

    /// Months between closing an account and it generating revenue
    #[serde(default)]
    pub sales_cycle_months: f64,

    /// Acquisition cost per closed account
    #[serde(default)]
    pub cac_per_account: f64,

    /// Cost of goods sold in percent of revenue (20.0 = 20%)
    #[serde(default)]
    pub cogs_pct: f64,

    /// Fixed operating cost per month (rent, tooling, etc.)
    #[serde(default)]
    pub fixed_monthly_cost: f64,
}

fn default_horizon() -> f64 { 24.0 }

impl Default for RawAssumptions {
    fn default() -> Self {
        Self {
            horizon_months: 24.0,
            price_per_account_per_month: 0.0,
            starting_customers: 0.0,
            new_accounts_per_month: 0.0,
            monthly_churn_pct: 0.0,
            sales_cycle_months: 0.0,
            cac_per_account: 0.0,
            cogs_pct: 0.0,
            fixed_monthly_cost: 0.0,
        }
    }
}

/// Validated assumptions with every field inside its allowed range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssumptionSet {
    pub horizon_months: u32,
    pub price_per_account_per_month: f64,
    pub starting_customers: u64,
    pub new_accounts_per_month: u64,
    /// Fraction of starting customers lost each month (0.0 to 1.0)
    pub monthly_churn_rate: f64,
    pub sales_cycle_months: u32,
    pub cac_per_account: f64,
    /// Fraction of revenue consumed by cost of goods sold (0.0 to 1.0)
    pub cogs_rate: f64,
    pub fixed_monthly_cost: f64,
}

impl Default for AssumptionSet {
    fn default() -> Self {
        Self::clamp(&RawAssumptions::default())
    }
}

impl AssumptionSet {
    /// Map arbitrary input into the valid ranges
    ///
    /// - Non-finite values fall back to the lower bound of their range
    /// - Counts are floored to integers in [0, MAX_CUSTOMERS]
    /// - Money amounts are bounded to [0, MAX_MONEY]
    /// - Percentages are divided by 100 and bounded to [0, 1]
    /// - Horizon is bounded to [3, 60] months, sales cycle to [0, 24]
    pub fn clamp(raw: &RawAssumptions) -> Self {
        let set = Self {
            horizon_months: whole_months(raw.horizon_months, MIN_HORIZON_MONTHS, MAX_HORIZON_MONTHS),
            price_per_account_per_month: bounded_money(raw.price_per_account_per_month),
            starting_customers: whole_count(raw.starting_customers),
            new_accounts_per_month: whole_count(raw.new_accounts_per_month),
            monthly_churn_rate: fraction_from_pct(raw.monthly_churn_pct),
            sales_cycle_months: whole_months(raw.sales_cycle_months, 0, MAX_SALES_CYCLE_MONTHS),
            cac_per_account: bounded_money(raw.cac_per_account),
            cogs_rate: fraction_from_pct(raw.cogs_pct),
            fixed_monthly_cost: bounded_money(raw.fixed_monthly_cost),
        };

        log_correction("horizonMonths", raw.horizon_months, set.horizon_months as f64);
        log_correction("pricePerAccountPerMonth", raw.price_per_account_per_month, set.price_per_account_per_month);
        log_correction("startingCustomers", raw.starting_customers, set.starting_customers as f64);
        log_correction("newAccountsPerMonth", raw.new_accounts_per_month, set.new_accounts_per_month as f64);
        log_correction("monthlyChurnPct", raw.monthly_churn_pct / 100.0, set.monthly_churn_rate);
        log_correction("salesCycleMonths", raw.sales_cycle_months, set.sales_cycle_months as f64);
        log_correction("cacPerAccount", raw.cac_per_account, set.cac_per_account);
        log_correction("cogsPct", raw.cogs_pct / 100.0, set.cogs_rate);
        log_correction("fixedMonthlyCost", raw.fixed_monthly_cost, set.fixed_monthly_cost);

        set
    }

    /// Convert back to the editable form (fractions become percentages)
    pub fn to_raw(&self) -> RawAssumptions {
        RawAssumptions {
            horizon_months: self.horizon_months as f64,
            price_per_account_per_month: self.price_per_account_per_month,
            starting_customers: self.starting_customers as f64,
            new_accounts_per_month: self.new_accounts_per_month as f64,
            monthly_churn_pct: self.monthly_churn_rate * 100.0,
            sales_cycle_months: self.sales_cycle_months as f64,
            cac_per_account: self.cac_per_account,
            cogs_pct: self.cogs_rate * 100.0,
            fixed_monthly_cost: self.fixed_monthly_cost,
        }
    }

    /// Gross margin earned per active customer per month
    pub fn gross_margin_per_customer_per_month(&self) -> f64 {
        self.price_per_account_per_month * (1.0 - self.cogs_rate)
    }
}

/// Bound a money amount to [0, MAX_MONEY]; non-finite values become 0
pub(crate) fn bounded_money(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, MAX_MONEY) } else { 0.0 }
}

fn whole_count(value: f64) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    value.floor().clamp(0.0, MAX_CUSTOMERS as f64) as u64
}

fn whole_months(value: f64, min: u32, max: u32) -> u32 {
    if !value.is_finite() {
        return min;
    }
    value.floor().clamp(min as f64, max as f64) as u32
}

fn fraction_from_pct(pct: f64) -> f64 {
    if !pct.is_finite() {
        return 0.0;
    }
    (pct / 100.0).clamp(0.0, 1.0)
}

fn log_correction(field: &str, raw: f64, clamped: f64) {
    if raw != clamped {
        debug!("Clamped {} from {} to {}", field, raw, clamped);
    }
}
