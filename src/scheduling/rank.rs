//! Candidate ranking for one (role, day, unit).
//!
//! Applies the hard eligibility filters in order, then sorts the survivors
//! by a total composite key so that the engine's choice is reproducible for
//! a fixed seed: fallback tier, hourly cost, hours already assigned this run
//! (fairness rotation), seeded jitter, employee id.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::config::ConstraintSet;
use crate::models::{Absence, Employee};

use super::decompose::span_hours;
use super::engine::CapacityLedger;

/// Tolerance applied to every cap comparison.
pub const CAP_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Orders eligible employees for one atomic unit, best first.
///
/// Hard filters, each excluding on failure:
/// 1. no absence overlapping the unit;
/// 2. not already assigned elsewhere at this (day, unit);
/// 3. skill match against the role or a role in its fallback chain;
/// 4. daily hours so far plus the unit length within the daily cap;
/// 5. weekly hours so far plus the unit length within the effective
///    weekly cap;
/// 6. sufficient rest since the last worked day.
///
/// Returns an empty vector when no employee is eligible; the engine treats
/// that as an unfulfilled slot, never as an error.
pub fn rank(
    role: &str,
    day: NaiveDate,
    unit_start: NaiveTime,
    unit_end: NaiveTime,
    employees: &[Employee],
    ledger: &CapacityLedger,
    absences: &[Absence],
    constraints: &ConstraintSet,
    seed: u64,
) -> Vec<String> {
    let unit_hours = span_hours(unit_start, unit_end);
    let week = day.iso_week();

    struct Candidate {
        tier: u32,
        cost: Decimal,
        worked: Decimal,
        jitter: u64,
        id: String,
    }

    let mut survivors: Vec<Candidate> = Vec::new();
    for employee in employees {
        let absent = absences.iter().any(|a| {
            a.employee_id == employee.id && a.date == day && a.overlaps(unit_start, unit_end)
        });
        if absent {
            continue;
        }
        if ledger.is_booked(&employee.id, day, unit_start) {
            continue;
        }
        let Some(tier) = fallback_tier(employee, role, constraints) else {
            continue;
        };
        if ledger.day_hours(&employee.id, day) + unit_hours
            > constraints.max_hours_per_day + CAP_EPSILON
        {
            continue;
        }
        if ledger.week_hours(&employee.id, week) + unit_hours
            > constraints.effective_week_cap(employee) + CAP_EPSILON
        {
            continue;
        }
        if let Some(rest) = ledger.rest_before(&employee.id, day, unit_start) {
            if rest + CAP_EPSILON < constraints.rest_hours_between_days {
                continue;
            }
        }

        survivors.push(Candidate {
            tier,
            cost: employee.hourly_cost,
            worked: ledger.total_hours(&employee.id),
            jitter: 0,
            id: employee.id.clone(),
        });
    }

    // One jitter draw per survivor, from an rng tied to (seed, day, unit),
    // so a re-run with the same inputs reproduces the ordering exactly.
    let mut rng = SmallRng::seed_from_u64(unit_seed(seed, day, unit_start));
    for candidate in &mut survivors {
        candidate.jitter = rng.random();
    }

    survivors.sort_by(|a, b| {
        (a.tier, a.cost, a.worked, a.jitter, a.id.as_str())
            .cmp(&(b.tier, b.cost, b.worked, b.jitter, b.id.as_str()))
    });
    survivors.into_iter().map(|c| c.id).collect()
}

/// Returns the fallback tier at which the employee can fill the role:
/// 0 for an exact skill match, `i + 1` for the i-th substitute role in the
/// chain, `None` when neither matches.
fn fallback_tier(employee: &Employee, role: &str, constraints: &ConstraintSet) -> Option<u32> {
    if employee.has_skill(role) {
        return Some(0);
    }
    constraints
        .fallback_chain(role)
        .iter()
        .position(|substitute| employee.has_skill(substitute))
        .map(|i| i as u32 + 1)
}

fn unit_seed(seed: u64, day: NaiveDate, unit_start: NaiveTime) -> u64 {
    let day_part = day.num_days_from_ce() as u64;
    let minute_part = u64::from(unit_start.hour() * 60 + unit_start.minute());
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(day_part << 16)
        .wrapping_add(minute_part)
}
