//! Month-by-month projection loop

use super::ledger::MonthlyLedgerRow;
use super::pipeline::PipelineQueue;
use super::summary::{summarize, ProjectionResult};
use crate::assumptions::AssumptionSet;
use crate::headcount::HeadcountSchedule;
use log::{debug, trace};

/// Projects a single scenario from clamped assumptions and a headcount schedule
///
/// The engine owns its inputs and never mutates them. Every call to `run`
/// builds its own pipeline queue, so repeated runs are independent and
/// reproduce the same ledger exactly.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: AssumptionSet,
    headcount: HeadcountSchedule,
}

impl ProjectionEngine {
    pub fn new(assumptions: AssumptionSet, headcount: HeadcountSchedule) -> Self {
        Self { assumptions, headcount }
    }

    pub fn assumptions(&self) -> &AssumptionSet {
        &self.assumptions
    }

    pub fn headcount(&self) -> &HeadcountSchedule {
        &self.headcount
    }

    /// Produce the monthly ledger for months 1..=horizon
    pub fn run(&self) -> Vec<MonthlyLedgerRow> {
        let a = &self.assumptions;
        debug!(
            "Projecting {} months: {} starting customers, {} closes/month, {} month sales cycle",
            a.horizon_months, a.starting_customers, a.new_accounts_per_month, a.sales_cycle_months
        );

        let mut pipeline = PipelineQueue::new(a.sales_cycle_months);
        let mut rows = Vec::with_capacity(a.horizon_months as usize);
        let mut customers = a.starting_customers;
        let mut cumulative_net = 0.0;

        for month in 1..=a.horizon_months {
            let starting = customers;

            // Round half up, never more than we have
            let churned = ((starting as f64 * a.monthly_churn_rate).round() as u64).min(starting);

            let closed = a.new_accounts_per_month;
            let activated = pipeline.advance(closed);

            // Cannot underflow since churned <= starting
            let ending = (starting - churned).saturating_add(activated);

            let revenue = ending as f64 * a.price_per_account_per_month;
            let cogs = revenue * a.cogs_rate;
            let gross_profit = revenue - cogs;

            // CAC is booked when the account closes, not when it activates
            let cac_spend = closed as f64 * a.cac_per_account;
            let headcount_cost = self.headcount.cost_for_month(month);
            let opex = a.fixed_monthly_cost + headcount_cost + cac_spend;

            let net = gross_profit - opex;
            cumulative_net += net;

            trace!(
                "Month {}: customers {} -> {} (churn {}, activated {}), net {:.2}",
                month, starting, ending, churned, activated, net
            );

            rows.push(MonthlyLedgerRow {
                month,
                starting_customers: starting,
                new_accounts_closed: closed,
                new_customers_activated: activated,
                churned_customers: churned,
                ending_customers: ending,
                revenue,
                cogs,
                gross_profit,
                cac_spend,
                headcount_cost,
                headcount: self.headcount.headcount_for_month(month),
                opex,
                net,
                cumulative_net,
            });

            customers = ending;
        }

        rows
    }

    /// Run the projection and summarize it
    pub fn project(&self) -> ProjectionResult {
        summarize(self.run(), &self.assumptions)
    }
}

/// Project a scenario without keeping an engine around
pub fn run_projection(assumptions: &AssumptionSet, headcount: &HeadcountSchedule) -> ProjectionResult {
    ProjectionEngine::new(assumptions.clone(), headcount.clone()).project()
}
