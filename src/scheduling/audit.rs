//! Coverage auditing.
//!
//! Compares what the engine assigned against the original demand blocks and
//! reports shortfalls. Findings are advisory: the engine never self-corrects,
//! the triage controller decides what to do about them.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};

use crate::error::EngineResult;
use crate::models::{Assignment, AuditFinding, DemandBlock};

use super::decompose::split;

/// Distinct employees assigned per (day, unit start, role).
pub(crate) fn headcount_by_unit(
    assignments: &[Assignment],
) -> HashMap<(NaiveDate, NaiveTime, String), HashSet<&str>> {
    let mut staffed: HashMap<(NaiveDate, NaiveTime, String), HashSet<&str>> = HashMap::new();
    for assignment in assignments {
        staffed
            .entry((assignment.day, assignment.unit_start, assignment.role.clone()))
            .or_default()
            .insert(assignment.employee_id.as_str());
    }
    staffed
}

/// Audits assignments against the original demand blocks.
///
/// For each block, `fulfilled` is the minimum over the block's atomic units
/// of the distinct-employee headcount at that unit — quantity means
/// concurrent headcount, not person-hours — capped at the requirement.
/// A finding is emitted only when the deviation is positive; fully covered
/// blocks produce nothing.
///
/// # Errors
///
/// Fails only when a block cannot be decomposed (malformed window); the
/// orchestration validates blocks up front, so this does not happen on the
/// pipeline path.
pub fn audit(
    assignments: &[Assignment],
    blocks: &[DemandBlock],
    unit_minutes: u32,
) -> EngineResult<Vec<AuditFinding>> {
    let staffed = headcount_by_unit(assignments);

    let mut findings = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        let units = split(block, unit_minutes)?;

        let fulfilled = units
            .iter()
            .map(|unit| {
                staffed
                    .get(&(unit.day, unit.unit_start, unit.role.clone()))
                    .map(|ids| ids.len() as u32)
                    .unwrap_or(0)
                    .min(block.quantity)
            })
            .min()
            .unwrap_or(0);

        if fulfilled < block.quantity {
            findings.push(AuditFinding {
                day: block.day,
                block: index,
                role: block.role.clone(),
                required: block.quantity,
                fulfilled,
                deviation: block.quantity - fulfilled,
            });
        }
    }
    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn block(day: &str, start: &str, end: &str, role: &str, quantity: u32) -> DemandBlock {
        DemandBlock {
            day: date(day),
            start_time: time(start),
            end_time: time(end),
            role: role.to_string(),
            quantity,
        }
    }

    fn assignment(emp: &str, day: &str, start: &str, end: &str, role: &str) -> Assignment {
        Assignment {
            employee_id: emp.to_string(),
            day: date(day),
            unit_start: time(start),
            unit_end: time(end),
            role: role.to_string(),
            hours: Decimal::ONE,
            cost_per_hour: Decimal::new(18, 0),
        }
    }

    #[test]
    fn test_fully_covered_block_produces_no_finding() {
        let blocks = vec![block("2025-09-22", "09:00", "11:00", "sales", 1)];
        let assignments = vec![
            assignment("E1", "2025-09-22", "09:00", "10:00", "sales"),
            assignment("E1", "2025-09-22", "10:00", "11:00", "sales"),
        ];

        let findings = audit(&assignments, &blocks, 60).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unstaffed_block_reports_full_deviation() {
        let blocks = vec![block("2025-09-22", "09:00", "11:00", "store_manager", 1)];

        let findings = audit(&[], &blocks, 60).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].required, 1);
        assert_eq!(findings[0].fulfilled, 0);
        assert_eq!(findings[0].deviation, 1);
        assert_eq!(findings[0].block, 0);
    }

    #[test]
    fn test_fulfilled_is_minimum_over_units() {
        // Both units staffed at quantity 2 except the second, which only
        // has one person: the whole block counts as fulfilled 1.
        let blocks = vec![block("2025-09-22", "09:00", "11:00", "sales", 2)];
        let assignments = vec![
            assignment("E1", "2025-09-22", "09:00", "10:00", "sales"),
            assignment("E2", "2025-09-22", "09:00", "10:00", "sales"),
            assignment("E1", "2025-09-22", "10:00", "11:00", "sales"),
        ];

        let findings = audit(&assignments, &blocks, 60).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].fulfilled, 1);
        assert_eq!(findings[0].deviation, 1);
    }

    #[test]
    fn test_fulfilled_never_exceeds_required() {
        let blocks = vec![block("2025-09-22", "09:00", "10:00", "sales", 1)];
        let assignments = vec![
            assignment("E1", "2025-09-22", "09:00", "10:00", "sales"),
            assignment("E2", "2025-09-22", "09:00", "10:00", "sales"),
            assignment("E3", "2025-09-22", "09:00", "10:00", "sales"),
        ];

        let findings = audit(&assignments, &blocks, 60).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_same_employee_does_not_count_twice_per_unit() {
        let blocks = vec![block("2025-09-22", "09:00", "10:00", "sales", 2)];
        // Duplicate assignment rows for the same employee at the same unit
        // collapse to one head.
        let assignments = vec![
            assignment("E1", "2025-09-22", "09:00", "10:00", "sales"),
            assignment("E1", "2025-09-22", "09:00", "10:00", "sales"),
        ];

        let findings = audit(&assignments, &blocks, 60).unwrap();
        assert_eq!(findings[0].fulfilled, 1);
    }

    #[test]
    fn test_roles_are_audited_independently() {
        let blocks = vec![
            block("2025-09-22", "09:00", "10:00", "sales", 1),
            block("2025-09-22", "09:00", "10:00", "cashier", 1),
        ];
        let assignments = vec![assignment("E1", "2025-09-22", "09:00", "10:00", "sales")];

        let findings = audit(&assignments, &blocks, 60).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].role, "cashier");
        assert_eq!(findings[0].block, 1);
    }

    #[test]
    fn test_malformed_block_is_an_error() {
        let blocks = vec![block("2025-09-22", "10:00", "09:00", "sales", 1)];
        assert!(audit(&[], &blocks, 60).is_err());
    }
}
