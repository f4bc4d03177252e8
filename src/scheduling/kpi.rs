//! Summary KPIs for one schedule generation.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::models::{Assignment, AuditFinding, DemandBlock, Kpi};

use super::decompose::span_hours;

/// Computes total cost and the coverage rate.
///
/// `total_cost` is the exact sum of hours x hourly cost over all
/// assignments. The coverage rate weights each finding's deviation by the
/// person-hours of its block:
///
/// ```text
/// coverage = 1 - (sum of deviation x block hours) / (sum of required x block hours)
/// ```
///
/// clamped to [0, 1], and 1 when there is no demand at all.
pub fn aggregate_kpi(
    assignments: &[Assignment],
    findings: &[AuditFinding],
    blocks: &[DemandBlock],
) -> Kpi {
    let total_cost: Decimal = assignments.iter().map(Assignment::cost).sum();

    let demanded_hours: Decimal = blocks
        .iter()
        .map(|b| Decimal::from(b.quantity) * span_hours(b.start_time, b.end_time))
        .sum();
    let shortfall_hours: Decimal = findings
        .iter()
        .filter_map(|f| {
            blocks
                .get(f.block)
                .map(|b| Decimal::from(f.deviation) * span_hours(b.start_time, b.end_time))
        })
        .sum();

    let coverage_rate = if demanded_hours > Decimal::ZERO {
        (Decimal::ONE - shortfall_hours / demanded_hours)
            .clamp(Decimal::ZERO, Decimal::ONE)
    } else {
        Decimal::ONE
    };

    let employees_used = assignments
        .iter()
        .map(|a| a.employee_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    Kpi {
        total_cost,
        coverage_rate,
        employees_used,
        total_assignments: assignments.len(),
    }
}
