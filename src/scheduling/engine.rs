//! Greedy assignment engine.
//!
//! Walks atomic demand in a fixed order and fills each unit one candidate at
//! a time, consulting the ranker and updating running capacity counters. The
//! engine never fails on under-coverage; unfilled units are surfaced later by
//! the auditor.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, IsoWeek, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ConstraintSet;
use crate::models::{Absence, Assignment, AtomicDemand, Employee};

use super::decompose::span_hours;
use super::rank::rank;

/// Running capacity counters for one scheduling pass.
///
/// The ledger is the engine's only mutable state. The ranker reads it to
/// apply the daily, weekly, double-booking and rest filters; the engine
/// updates it after every emitted assignment.
#[derive(Debug, Default)]
pub struct CapacityLedger {
    day_hours: HashMap<(String, NaiveDate), Decimal>,
    week_hours: HashMap<(String, IsoWeek), Decimal>,
    total_hours: HashMap<String, Decimal>,
    booked: HashSet<(String, NaiveDate, NaiveTime)>,
    worked_spans: HashMap<String, BTreeMap<NaiveDate, (NaiveTime, NaiveTime)>>,
}

impl CapacityLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one emitted assignment.
    pub fn record(&mut self, assignment: &Assignment) {
        let id = assignment.employee_id.clone();
        let day = assignment.day;

        *self
            .day_hours
            .entry((id.clone(), day))
            .or_insert(Decimal::ZERO) += assignment.hours;
        *self
            .week_hours
            .entry((id.clone(), day.iso_week()))
            .or_insert(Decimal::ZERO) += assignment.hours;
        *self.total_hours.entry(id.clone()).or_insert(Decimal::ZERO) += assignment.hours;
        self.booked
            .insert((id.clone(), day, assignment.unit_start));

        let span = self
            .worked_spans
            .entry(id)
            .or_default()
            .entry(day)
            .or_insert((assignment.unit_start, assignment.unit_end));
        span.0 = span.0.min(assignment.unit_start);
        span.1 = span.1.max(assignment.unit_end);
    }

    /// Hours assigned to the employee on the given day so far.
    pub fn day_hours(&self, employee_id: &str, day: NaiveDate) -> Decimal {
        self.day_hours
            .get(&(employee_id.to_string(), day))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Hours assigned to the employee in the given ISO week so far.
    pub fn week_hours(&self, employee_id: &str, week: IsoWeek) -> Decimal {
        self.week_hours
            .get(&(employee_id.to_string(), week))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Hours assigned to the employee over the whole run so far.
    pub fn total_hours(&self, employee_id: &str) -> Decimal {
        self.total_hours
            .get(employee_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// True when the employee already holds an assignment at this unit.
    pub fn is_booked(&self, employee_id: &str, day: NaiveDate, unit_start: NaiveTime) -> bool {
        self.booked
            .contains(&(employee_id.to_string(), day, unit_start))
    }

    /// Hours between the end of the employee's most recent earlier worked
    /// day and the given unit start. `None` when no earlier day was worked.
    pub fn rest_before(
        &self,
        employee_id: &str,
        day: NaiveDate,
        unit_start: NaiveTime,
    ) -> Option<Decimal> {
        let spans = self.worked_spans.get(employee_id)?;
        let (prev_day, (_, prev_end)) = spans.range(..day).next_back()?;
        let gap = day.and_time(unit_start) - prev_day.and_time(*prev_end);
        Some(Decimal::from(gap.num_minutes()) / Decimal::from(60))
    }
}

/// Assigns employees to atomic demand units, best candidate first.
///
/// Units are processed in a fixed order (day, unit start, role) and each
/// unit is filled one head at a time until its quantity is reached or no
/// eligible candidate remains. Under-coverage is not an error: the unit is
/// left short and processing continues.
///
/// An employee who exhausts a cap partway through a block simply stops
/// surviving the ranker's filters for the later units of that block, so
/// mid-block replacement needs no special handling here.
pub fn assign(
    atomic: &[AtomicDemand],
    employees: &[Employee],
    absences: &[Absence],
    constraints: &ConstraintSet,
    seed: u64,
) -> Vec<Assignment> {
    let mut ordered: Vec<&AtomicDemand> = atomic.iter().collect();
    ordered.sort_by(|a, b| {
        (a.day, a.unit_start, a.role.as_str()).cmp(&(b.day, b.unit_start, b.role.as_str()))
    });

    let by_id: HashMap<&str, &Employee> = employees.iter().map(|e| (e.id.as_str(), e)).collect();

    let mut ledger = CapacityLedger::new();
    let mut assignments = Vec::new();

    for unit in ordered {
        let mut fulfilled = 0;
        while fulfilled < unit.quantity {
            let ranked = rank(
                &unit.role,
                unit.day,
                unit.unit_start,
                unit.unit_end,
                employees,
                &ledger,
                absences,
                constraints,
                seed,
            );
            let Some(best) = ranked.first() else {
                debug!(
                    day = %unit.day,
                    unit = %unit.unit_start,
                    role = %unit.role,
                    short = unit.quantity - fulfilled,
                    "no eligible candidate, leaving unit unfulfilled"
                );
                break;
            };
            // The ranker only returns ids drawn from `employees`.
            let Some(employee) = by_id.get(best.as_str()) else {
                break;
            };

            let assignment = Assignment {
                employee_id: employee.id.clone(),
                day: unit.day,
                unit_start: unit.unit_start,
                unit_end: unit.unit_end,
                role: unit.role.clone(),
                hours: span_hours(unit.unit_start, unit.unit_end),
                cost_per_hour: employee.hourly_cost,
            };
            ledger.record(&assignment);
            debug!(
                employee = %assignment.employee_id,
                day = %assignment.day,
                unit = %assignment.unit_start,
                role = %assignment.role,
                "assigned"
            );
            assignments.push(assignment);
            fulfilled += 1;
        }
    }

    assignments
}
