//! Shift consolidation.
//!
//! Merges contiguous per-employee assignments into human-readable shifts.
//! The merge is a lossless partition: every assignment lands in exactly one
//! shift, and total hours and cost are conserved exactly.

use std::collections::BTreeMap;

use crate::models::{Assignment, Shift};

/// Consolidates atomic assignments into shifts.
///
/// Assignments are grouped by (employee, day, role) and sorted by unit
/// start within each group; a run is merged while one unit's end equals the
/// next unit's start, and any gap starts a new shift. Output is sorted by
/// (day, employee, start).
///
/// # Example
///
/// ```
/// use roster_engine::models::Assignment;
/// use roster_engine::scheduling::consolidate;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let unit = |start: u32| Assignment {
///     employee_id: "E1".to_string(),
///     day: NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
///     unit_start: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
///     unit_end: NaiveTime::from_hms_opt(start + 1, 0, 0).unwrap(),
///     role: "sales".to_string(),
///     hours: Decimal::ONE,
///     cost_per_hour: Decimal::new(18, 0),
/// };
/// let shifts = consolidate(&[unit(9), unit(10), unit(11)]);
/// assert_eq!(shifts.len(), 1);
/// assert_eq!(shifts[0].hours, Decimal::from(3));
/// ```
pub fn consolidate(assignments: &[Assignment]) -> Vec<Shift> {
    // BTreeMap keys give the (day, employee, role) output order for free.
    let mut grouped: BTreeMap<(chrono::NaiveDate, String, String), Vec<&Assignment>> =
        BTreeMap::new();
    for assignment in assignments {
        grouped
            .entry((
                assignment.day,
                assignment.employee_id.clone(),
                assignment.role.clone(),
            ))
            .or_default()
            .push(assignment);
    }

    let mut shifts = Vec::new();
    for ((day, employee_id, role), mut group) in grouped {
        group.sort_by_key(|a| a.unit_start);

        let mut current: Option<Shift> = None;
        for assignment in group {
            current = match current.take() {
                Some(mut shift) if shift.end == assignment.unit_start => {
                    shift.end = assignment.unit_end;
                    shift.hours += assignment.hours;
                    shift.cost += assignment.cost();
                    Some(shift)
                }
                previous => {
                    if let Some(done) = previous {
                        shifts.push(done);
                    }
                    Some(Shift {
                        employee_id: employee_id.clone(),
                        day,
                        role: role.clone(),
                        start: assignment.unit_start,
                        end: assignment.unit_end,
                        hours: assignment.hours,
                        cost: assignment.cost(),
                    })
                }
            };
        }
        if let Some(done) = current {
            shifts.push(done);
        }
    }

    shifts.sort_by(|a, b| {
        (a.day, a.employee_id.as_str(), a.start).cmp(&(b.day, b.employee_id.as_str(), b.start))
    });
    shifts
}
