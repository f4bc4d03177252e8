//! Employee and absence models.
//!
//! This module defines the Employee struct and the Absence record used to
//! mark time windows during which an employee cannot be scheduled.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee available for shift assignment.
///
/// # Example
///
/// ```
/// use roster_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "E1".to_string(),
///     name: "Alice".to_string(),
///     hourly_cost: Decimal::new(180, 1), // 18.0
///     max_hours_week: Some(Decimal::new(30, 0)),
///     skills: vec!["cashier".to_string(), "sales".to_string()],
/// };
/// assert!(employee.has_skill("Sales"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The cost of one worked hour.
    pub hourly_cost: Decimal,
    /// Contractual weekly hour cap. When absent or non-positive, the
    /// default weekly cap from the constraint set applies.
    #[serde(default)]
    pub max_hours_week: Option<Decimal>,
    /// Roles the employee is qualified to fill.
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Employee {
    /// Returns true if the employee is qualified for the given role.
    ///
    /// Comparison is case-insensitive; ingestion is expected to have already
    /// normalized synonyms away.
    pub fn has_skill(&self, role: &str) -> bool {
        self.skills.iter().any(|s| s.eq_ignore_ascii_case(role))
    }
}

/// The reason an employee is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceType {
    /// Planned vacation.
    Vacation,
    /// Sick leave.
    Sick,
    /// Off-floor training.
    Training,
    /// Any other reason.
    Other,
}

/// A time window on one day during which an employee is unavailable.
///
/// # Example
///
/// ```
/// use roster_engine::models::{Absence, AbsenceType};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let absence = Absence {
///     employee_id: "E2".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
///     absence_type: AbsenceType::Vacation,
/// };
/// assert!(absence.overlaps(
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Absence {
    /// The employee this absence belongs to.
    pub employee_id: String,
    /// The day of the absence.
    pub date: NaiveDate,
    /// Start of the absent window.
    pub start_time: NaiveTime,
    /// End of the absent window.
    pub end_time: NaiveTime,
    /// The reason for the absence.
    #[serde(rename = "type")]
    pub absence_type: AbsenceType,
}

impl Absence {
    /// Creates an absence spanning the whole working day.
    pub fn full_day(employee_id: impl Into<String>, date: NaiveDate, absence_type: AbsenceType) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
            absence_type,
        }
    }

    /// Returns true if the absent window overlaps the given window.
    ///
    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time.max(start) < self.end_time.min(end)
    }
}
