//! Growth and cost assumptions plus input loading

mod set;
pub mod loader;

pub use set::{
    AssumptionSet, RawAssumptions, MAX_CUSTOMERS, MAX_HORIZON_MONTHS, MAX_MONEY,
    MAX_SALES_CYCLE_MONTHS, MIN_HORIZON_MONTHS,
};
pub(crate) use set::bounded_money;
pub use loader::{load_headcount_csv, load_inputs, load_inputs_from_reader, ProjectionInputs};
