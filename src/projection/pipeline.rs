//! Sales-cycle lag between closing an account and activating it
//!
//! A fixed-length FIFO: it starts with one empty slot per month of lag, and
//! each month one closed cohort goes in the back while the cohort closed
//! `lag` months earlier comes out the front.

use std::collections::VecDeque;

/// Fixed-delay queue of closed-but-not-yet-active account counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineQueue {
    slots: VecDeque<u64>,
}

impl PipelineQueue {
    /// Create a queue holding `sales_cycle_months` empty cohorts
    pub fn new(sales_cycle_months: u32) -> Self {
        let lag = sales_cycle_months as usize;
        let mut slots = VecDeque::with_capacity(lag + 1);
        slots.extend(std::iter::repeat(0).take(lag));
        Self { slots }
    }

    /// Add the cohort closed this month to the back
    pub fn enqueue(&mut self, closed: u64) {
        self.slots.push_back(closed);
    }

    /// Remove and return the cohort activating this month
    ///
    /// Returns 0 when nothing is queued. With zero lag, calling this right
    /// after `enqueue` returns the cohort just added.
    pub fn dequeue(&mut self) -> u64 {
        self.slots.pop_front().unwrap_or(0)
    }

    /// Enqueue this month's closes and return this month's activations
    pub fn advance(&mut self, closed: u64) -> u64 {
        self.enqueue(closed);
        self.dequeue()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Accounts closed but not yet activated
    pub fn in_transit(&self) -> u64 {
        self.slots.iter().fold(0u64, |total, &cohort| total.saturating_add(cohort))
    }
}
