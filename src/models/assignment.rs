//! Assignment and shift models.
//!
//! An [`Assignment`] binds one employee to one atomic demand unit and is
//! immutable once the engine emits it. A [`Shift`] is the human-readable
//! consolidation of a contiguous run of assignments.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee covering one atomic demand unit.
///
/// # Example
///
/// ```
/// use roster_engine::models::Assignment;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let assignment = Assignment {
///     employee_id: "E1".to_string(),
///     day: NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
///     unit_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     unit_end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     role: "sales".to_string(),
///     hours: Decimal::ONE,
///     cost_per_hour: Decimal::new(180, 1),
/// };
/// assert_eq!(assignment.cost(), Decimal::new(180, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The assigned employee.
    pub employee_id: String,
    /// The day of the unit.
    pub day: NaiveDate,
    /// Start of the unit.
    pub unit_start: NaiveTime,
    /// End of the unit.
    pub unit_end: NaiveTime,
    /// The role being filled.
    pub role: String,
    /// Length of the unit in hours.
    pub hours: Decimal,
    /// The employee's hourly cost at assignment time.
    pub cost_per_hour: Decimal,
}

impl Assignment {
    /// Returns the cost of this assignment (hours x hourly cost).
    pub fn cost(&self) -> Decimal {
        self.hours * self.cost_per_hour
    }
}

/// A contiguous run of assignments for one employee, day and role.
///
/// Shifts are derived by the consolidator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// The assigned employee.
    pub employee_id: String,
    /// The day of the shift.
    pub day: NaiveDate,
    /// The role worked for the whole shift.
    pub role: String,
    /// Shift start.
    pub start: NaiveTime,
    /// Shift end.
    pub end: NaiveTime,
    /// Total worked hours.
    pub hours: Decimal,
    /// Total cost of the shift.
    pub cost: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_assignment_cost() {
        let assignment = Assignment {
            employee_id: "E1".to_string(),
            day: date("2025-09-22"),
            unit_start: time("08:00"),
            unit_end: time("09:00"),
            role: "sales".to_string(),
            hours: Decimal::ONE,
            cost_per_hour: Decimal::new(2050, 2),
        };
        assert_eq!(assignment.cost(), Decimal::new(2050, 2));
    }

    #[test]
    fn test_assignment_cost_fractional_unit() {
        // A 30-minute unit at 18.00/h costs exactly 9.00.
        let assignment = Assignment {
            employee_id: "E1".to_string(),
            day: date("2025-09-22"),
            unit_start: time("08:00"),
            unit_end: time("08:30"),
            role: "sales".to_string(),
            hours: Decimal::new(5, 1),
            cost_per_hour: Decimal::new(18, 0),
        };
        assert_eq!(assignment.cost(), Decimal::new(9, 0));
    }

    #[test]
    fn test_assignment_serialization_round_trip() {
        let assignment = Assignment {
            employee_id: "E1".to_string(),
            day: date("2025-09-22"),
            unit_start: time("08:00"),
            unit_end: time("09:00"),
            role: "sales".to_string(),
            hours: Decimal::ONE,
            cost_per_hour: Decimal::new(180, 1),
        };
        let json = serde_json::to_string(&assignment).unwrap();
        let deserialized: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(assignment, deserialized);
    }

    #[test]
    fn test_shift_serialization_round_trip() {
        let shift = Shift {
            employee_id: "E1".to_string(),
            day: date("2025-09-22"),
            role: "sales".to_string(),
            start: time("08:00"),
            end: time("12:00"),
            hours: Decimal::new(4, 0),
            cost: Decimal::new(72, 0),
        };
        let json = serde_json::to_string(&shift).unwrap();
        let deserialized: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(shift, deserialized);
    }
}
