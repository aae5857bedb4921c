//! Load projection inputs from JSON and headcount plans from CSV
//!
//! JSON bundle layout (every section optional):
//! ```json
//! {
//!   "assumptions": { "horizonMonths": 24, "pricePerAccountPerMonth": 99, "monthlyChurnPct": 3 },
//!   "headcount": [ { "role": "engineering", "count": 2, "fullyLoadedMonthlyCost": 12000, "startMonth": 1 } ],
//!   "scenarios": [ { "name": "price +10%", "adjustment": { "priceMult": 1.1 } } ]
//! }
//! ```
//!
//! Headcount CSV columns: `role,count,fullyLoadedMonthlyCost,startMonth,endMonth`
//! (leave `endMonth` empty for an open-ended line).

use super::set::{AssumptionSet, RawAssumptions};
use crate::error::InputResult;
use crate::headcount::{HeadcountSchedule, RawHeadcountLine};
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Everything a caller submits for one projection request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    #[serde(default)]
    pub assumptions: RawAssumptions,
    #[serde(default)]
    pub headcount: Vec<RawHeadcountLine>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl ProjectionInputs {
    /// Clamped assumptions ready for the engine
    pub fn assumption_set(&self) -> AssumptionSet {
        AssumptionSet::clamp(&self.assumptions)
    }

    /// Clamped headcount schedule ready for the engine
    pub fn headcount_schedule(&self) -> HeadcountSchedule {
        HeadcountSchedule::from_raw(&self.headcount)
    }
}

/// Load a JSON input bundle from disk
pub fn load_inputs<P: AsRef<Path>>(path: P) -> InputResult<ProjectionInputs> {
    let file = File::open(path)?;
    load_inputs_from_reader(BufReader::new(file))
}

/// Load a JSON input bundle from any reader
pub fn load_inputs_from_reader<R: Read>(reader: R) -> InputResult<ProjectionInputs> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read headcount lines from CSV
pub fn load_headcount_csv<R: Read>(reader: R) -> InputResult<Vec<RawHeadcountLine>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut lines = Vec::new();
    for record in csv_reader.deserialize() {
        let line: RawHeadcountLine = record?;
        lines.push(line);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::headcount::Role;

    #[test]
    fn test_load_json_bundle() {
        let json = r#"{
            "assumptions": {
                "horizonMonths": 12,
                "pricePerAccountPerMonth": 99,
                "startingCustomers": 40,
                "monthlyChurnPct": 3,
                "cogsPct": 180
            },
            "headcount": [
                {"role": "engineering", "count": 2, "fullyLoadedMonthlyCost": 12000, "startMonth": 1},
                {"role": "support", "count": 1, "fullyLoadedMonthlyCost": 5000, "startMonth": 4, "endMonth": 9}
            ],
            "scenarios": [
                {"name": "discount", "adjustment": {"priceMult": 0.8}}
            ]
        }"#;
        let inputs = load_inputs_from_reader(json.as_bytes()).unwrap();

        let set = inputs.assumption_set();
        assert_eq!(set.horizon_months, 12);
        assert_eq!(set.starting_customers, 40);
        assert_eq!(set.cogs_rate, 1.0);

        let schedule = inputs.headcount_schedule();
        assert_eq!(schedule.lines().len(), 2);
        assert_eq!(schedule.cost_for_month(5), 29_000.0);
        assert_eq!(schedule.cost_for_month(10), 24_000.0);

        assert_eq!(inputs.scenarios.len(), 1);
        assert_eq!(inputs.scenarios[0].adjustment.price_mult, 0.8);
    }

    #[test]
    fn test_empty_bundle_uses_defaults() {
        let inputs = load_inputs_from_reader("{}".as_bytes()).unwrap();
        assert_eq!(inputs, ProjectionInputs::default());
        assert_eq!(inputs.assumption_set().horizon_months, 24);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = load_inputs_from_reader("{\"assumptions\": [".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
    }

    #[test]
    fn test_load_headcount_csv() {
        let csv = "\
role,count,fullyLoadedMonthlyCost,startMonth,endMonth
engineering, 3, 14000, 1,
sales, 2, 9000, 4, 12
";
        let lines = load_headcount_csv(csv.as_bytes()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].role, Role::Engineering);
        assert_eq!(lines[0].end_month, None);
        assert_eq!(lines[1].end_month, Some(12.0));

        let schedule = HeadcountSchedule::from_raw(&lines);
        assert_eq!(schedule.cost_for_month(4), 42_000.0 + 18_000.0);
        assert_eq!(schedule.cost_for_month(13), 42_000.0);
    }

    #[test]
    fn test_unknown_role_in_csv() {
        let csv = "role,count,fullyLoadedMonthlyCost,startMonth,endMonth\nmarketing,1,5000,1,\n";
        let err = load_headcount_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::Csv(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_inputs("/nonexistent/projection_inputs.json").unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }
}
