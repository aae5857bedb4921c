//! What-if scenarios evaluated against a base set of assumptions
//!
//! A scenario scales or shifts the base assumptions and is then re-clamped,
//! so adjusted values always stay inside the ranges the engine expects.
//! Scenarios are projected in parallel; each one builds its own engine.

use crate::assumptions::{AssumptionSet, RawAssumptions};
use crate::headcount::HeadcountSchedule;
use crate::projection::{ProjectionEngine, ProjectionResult};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Adjustments applied on top of the base assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAdjustment {
    /// Multiplier on price per account (1.0 = no change)
    #[serde(default = "default_one")]
    pub price_mult: f64,

    /// Multiplier on accounts closed per month (result is floored)
    #[serde(default = "default_one")]
    pub new_accounts_mult: f64,

    /// Multiplier on monthly churn rate
    #[serde(default = "default_one")]
    pub churn_mult: f64,

    /// Multiplier on CAC per account
    #[serde(default = "default_one")]
    pub cac_mult: f64,

    /// Multiplier on COGS rate
    #[serde(default = "default_one")]
    pub cogs_mult: f64,

    /// Multiplier on fixed monthly cost
    #[serde(default = "default_one")]
    pub fixed_cost_mult: f64,

    /// Months added to (or removed from) the sales cycle
    #[serde(default)]
    pub sales_cycle_delta: i32,

    /// Replacement horizon in months
    #[serde(default)]
    pub horizon_months: Option<f64>,
}

fn default_one() -> f64 { 1.0 }

impl Default for ScenarioAdjustment {
    fn default() -> Self {
        Self {
            price_mult: 1.0,
            new_accounts_mult: 1.0,
            churn_mult: 1.0,
            cac_mult: 1.0,
            cogs_mult: 1.0,
            fixed_cost_mult: 1.0,
            sales_cycle_delta: 0,
            horizon_months: None,
        }
    }
}

impl ScenarioAdjustment {
    /// Apply to a base set and clamp the result back into range
    pub fn apply(&self, base: &AssumptionSet) -> AssumptionSet {
        let raw = base.to_raw();
        let adjusted = RawAssumptions {
            horizon_months: self.horizon_months.unwrap_or(raw.horizon_months),
            price_per_account_per_month: raw.price_per_account_per_month * self.price_mult,
            starting_customers: raw.starting_customers,
            new_accounts_per_month: raw.new_accounts_per_month * self.new_accounts_mult,
            monthly_churn_pct: raw.monthly_churn_pct * self.churn_mult,
            sales_cycle_months: raw.sales_cycle_months + self.sales_cycle_delta as f64,
            cac_per_account: raw.cac_per_account * self.cac_mult,
            cogs_pct: raw.cogs_pct * self.cogs_mult,
            fixed_monthly_cost: raw.fixed_monthly_cost * self.fixed_cost_mult,
        };
        AssumptionSet::clamp(&adjusted)
    }
}

/// Named what-if scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub adjustment: ScenarioAdjustment,
}

impl Scenario {
    pub fn new(name: impl Into<String>, adjustment: ScenarioAdjustment) -> Self {
        Self {
            name: name.into(),
            adjustment,
        }
    }
}

/// Projection of a single scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    /// Assumptions actually projected, after adjustment and clamping
    pub assumptions: AssumptionSet,
    pub result: ProjectionResult,
}

/// Evaluates scenarios against shared base assumptions and headcount
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: AssumptionSet,
    headcount: HeadcountSchedule,
}

impl ScenarioRunner {
    pub fn new(base: AssumptionSet, headcount: HeadcountSchedule) -> Self {
        Self { base, headcount }
    }

    /// Project the unadjusted base assumptions
    pub fn run_base(&self) -> ProjectionResult {
        ProjectionEngine::new(self.base.clone(), self.headcount.clone()).project()
    }

    /// Project one scenario
    pub fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        let assumptions = scenario.adjustment.apply(&self.base);
        let result = ProjectionEngine::new(assumptions.clone(), self.headcount.clone()).project();
        ScenarioOutcome {
            name: scenario.name.clone(),
            assumptions,
            result,
        }
    }

    /// Project every scenario in parallel; outcomes keep the input order
    pub fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let start = Instant::now();
        let outcomes: Vec<ScenarioOutcome> = scenarios
            .par_iter()
            .map(|scenario| self.run_scenario(scenario))
            .collect();
        info!("Projected {} scenarios in {:?}", outcomes.len(), start.elapsed());
        outcomes
    }
}
