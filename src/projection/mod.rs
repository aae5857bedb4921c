//! Projection engine, ledger and summary metrics

mod pipeline;
mod engine;
mod ledger;
mod summary;

pub use pipeline::PipelineQueue;
pub use engine::{run_projection, ProjectionEngine};
pub use ledger::{period_label, write_ledger_csv, MonthlyLedgerRow};
pub use summary::{summarize, ProjectionResult, Totals};

/// Months in a year, used to annualize recurring revenue
pub const MONTHS_PER_YEAR: f64 = 12.0;
