//! # Billing
//!
//! Closing charge = billable days × the vehicle's daily rate.
//!
//! A partial day is billed as a full day unless it is within the grace
//! period, and a rental never bills fewer than `minimum_days`. The result
//! only grows as the end time moves later.

use chrono::Duration;

use crate::core::model::{Money, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPolicy {
    pub grace: Duration,
    pub minimum_days: u32,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            grace: Duration::zero(),
            minimum_days: 1,
        }
    }
}

impl BillingPolicy {
    /// Number of days to bill between `start` and `end`.
    ///
    /// Callers guarantee `end >= start`; a reversed range bills the minimum.
    pub fn billable_days(&self, start: Timestamp, end: Timestamp) -> u64 {
        let elapsed = (end - start).max(Duration::zero());
        let whole = elapsed.num_days();
        // Compared as durations so sub-second overruns still count.
        let remainder = elapsed - Duration::days(whole);
        let partial = if remainder > self.grace.max(Duration::zero()) { 1 } else { 0 };
        let days = (whole + partial) as u64;
        days.max(u64::from(self.minimum_days))
    }

    pub fn charge(&self, start: Timestamp, end: Timestamp, daily_rate: Money) -> Money {
        daily_rate.times(self.billable_days(start, end))
    }
}
