//! Headcount cost schedules
//!
//! Each line staffs a role for a window of projection months. A line with no
//! end month stays on the payroll for the rest of the horizon.

use crate::assumptions::bounded_money;
use serde::{Deserialize, Serialize};

/// Functional area a headcount line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Engineering,
    Product,
    Design,
    Sales,
    Support,
}

impl Role {
    /// All roles in reporting order
    pub const ALL: [Role; 5] = [
        Role::Engineering,
        Role::Product,
        Role::Design,
        Role::Sales,
        Role::Support,
    ];
}

/// Staffing cost line active over an inclusive window of months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadcountLine {
    pub role: Role,
    pub count: u32,
    /// Salary plus benefits, taxes and equipment per person per month
    pub fully_loaded_monthly_cost: f64,
    /// First month the line is active (1-indexed)
    pub start_month: u32,
    /// Last month the line is active; `None` means open-ended
    pub end_month: Option<u32>,
}

impl HeadcountLine {
    /// Create a line, normalizing months so that 1 <= start <= end and
    /// bounding the cost to [0, MAX_MONEY] (non-finite costs become 0)
    pub fn new(
        role: Role,
        count: u32,
        fully_loaded_monthly_cost: f64,
        start_month: u32,
        end_month: Option<u32>,
    ) -> Self {
        let start_month = start_month.max(1);
        Self {
            role,
            count,
            fully_loaded_monthly_cost: bounded_money(fully_loaded_monthly_cost),
            start_month,
            end_month: end_month.map(|end| end.max(start_month)),
        }
    }

    /// Whether the line is on payroll in the given month
    pub fn is_active(&self, month: u32) -> bool {
        month >= 1
            && self.start_month <= month
            && self.end_month.map_or(true, |end| month <= end)
    }

    /// Monthly cost of the line
    ///
    /// Lines deserialized directly skip `new`, so the cost bound is applied
    /// here as well.
    pub fn monthly_cost(&self) -> f64 {
        self.count as f64 * bounded_money(self.fully_loaded_monthly_cost)
    }
}

/// Unvalidated headcount line as entered by a user or read from CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHeadcountLine {
    pub role: Role,
    #[serde(default)]
    pub count: f64,
    #[serde(default)]
    pub fully_loaded_monthly_cost: f64,
    #[serde(default = "default_start_month")]
    pub start_month: f64,
    #[serde(default)]
    pub end_month: Option<f64>,
}

fn default_start_month() -> f64 { 1.0 }

impl RawHeadcountLine {
    /// Clamp to a valid line: negatives become zero, months start at 1,
    /// and an end before the start collapses onto the start
    pub fn clamp(&self) -> HeadcountLine {
        HeadcountLine::new(
            self.role,
            whole(self.count),
            self.fully_loaded_monthly_cost,
            whole(self.start_month),
            // A non-finite end month is treated as open-ended
            self.end_month.filter(|end| end.is_finite()).map(whole),
        )
    }
}

fn whole(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u32
    } else {
        0
    }
}

/// Set of staffing lines over the projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeadcountSchedule {
    lines: Vec<HeadcountLine>,
}

impl HeadcountSchedule {
    pub fn new(lines: Vec<HeadcountLine>) -> Self {
        Self { lines }
    }

    /// Build a schedule from raw lines, clamping each one
    pub fn from_raw(lines: &[RawHeadcountLine]) -> Self {
        Self {
            lines: lines.iter().map(RawHeadcountLine::clamp).collect(),
        }
    }

    pub fn lines(&self) -> &[HeadcountLine] {
        &self.lines
    }

    pub fn push(&mut self, line: HeadcountLine) {
        self.lines.push(line);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total staffing cost in a month
    ///
    /// Sums `count * fully_loaded_monthly_cost` over every line whose window
    /// contains `month`. Months below 1 cost nothing.
    pub fn cost_for_month(&self, month: u32) -> f64 {
        self.lines
            .iter()
            .filter(|line| line.is_active(month))
            .map(HeadcountLine::monthly_cost)
            .sum()
    }

    /// Number of people on payroll in a month
    pub fn headcount_for_month(&self, month: u32) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.is_active(month))
            .map(|line| line.count)
            .fold(0u32, u32::saturating_add)
    }

    /// Staffing cost in a month broken down by role
    ///
    /// Roles are reported in `Role::ALL` order; roles with no cost are omitted.
    pub fn cost_by_role(&self, month: u32) -> Vec<(Role, f64)> {
        Role::ALL
            .iter()
            .filter_map(|&role| {
                let cost: f64 = self
                    .lines
                    .iter()
                    .filter(|line| line.role == role && line.is_active(month))
                    .map(HeadcountLine::monthly_cost)
                    .sum();
                (cost > 0.0).then_some((role, cost))
            })
            .collect()
    }
}
