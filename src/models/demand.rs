//! Demand models.
//!
//! A [`DemandBlock`] is the caller-supplied requirement "this many people in
//! this role over this window". The decomposer derives [`AtomicDemand`] units
//! from it; those units exist only for the duration of a run.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A staffing requirement for one role over one time window on one day.
///
/// `quantity` is concurrent headcount: the number of people that must be
/// present during every hour of the window, not a person-hour total.
///
/// # Example
///
/// ```
/// use roster_engine::models::DemandBlock;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let block = DemandBlock {
///     day: NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     role: "sales".to_string(),
///     quantity: 1,
/// };
/// assert_eq!(block.window_minutes(), 240);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandBlock {
    /// The day the demand applies to.
    pub day: NaiveDate,
    /// Start of the demand window.
    pub start_time: NaiveTime,
    /// End of the demand window. Must lie after the start on the same day.
    pub end_time: NaiveTime,
    /// The role to staff.
    pub role: String,
    /// Concurrent headcount required throughout the window.
    pub quantity: u32,
}

impl DemandBlock {
    /// Returns the length of the demand window in minutes.
    ///
    /// Negative (inverted) windows yield a negative value; the decomposer
    /// rejects those before any assignment starts.
    pub fn window_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// One atomic, schedulable slice of a demand block.
///
/// Atomic units all share the run's unit size and inherit the role and
/// quantity of the block they were split from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicDemand {
    /// The day the unit applies to.
    pub day: NaiveDate,
    /// Start of the unit.
    pub unit_start: NaiveTime,
    /// End of the unit.
    pub unit_end: NaiveTime,
    /// The role to staff.
    pub role: String,
    /// Concurrent headcount required during this unit.
    pub quantity: u32,
}
