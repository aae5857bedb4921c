//! Unit Economics - Deterministic monthly projection engine for subscription businesses
//!
//! This library provides:
//! - Range-clamped growth and cost assumptions
//! - Time-windowed headcount cost schedules
//! - Sales-cycle lag modeling between closing and activating accounts
//! - Monthly ledger projection (customers, revenue, costs, net income)
//! - Unit-economics summaries (MRR, ARR, LTV, CAC payback, break-even)
//! - Parallel what-if scenario evaluation

pub mod error;
pub mod assumptions;
pub mod headcount;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{InputError, InputResult};
pub use assumptions::{AssumptionSet, RawAssumptions, ProjectionInputs};
pub use headcount::{HeadcountLine, HeadcountSchedule, Role};
pub use projection::{
    run_projection, summarize, MonthlyLedgerRow, PipelineQueue, ProjectionEngine,
    ProjectionResult, Totals,
};
pub use scenario::{Scenario, ScenarioAdjustment, ScenarioOutcome, ScenarioRunner};
