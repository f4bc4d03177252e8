//! Demand decomposition.
//!
//! Splits multi-hour demand blocks into atomic units ahead of assignment,
//! and re-aggregates assignments per original block for reporting. The
//! aggregate view is never used for capacity logic.

use chrono::Duration;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Assignment, AtomicDemand, DemandBlock};

use super::audit::headcount_by_unit;

/// Per-block person-hour totals, for reporting only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFulfillment {
    /// Index of the block in the caller's original demand list.
    pub block: usize,
    /// Required person-hours (quantity x window length).
    pub required_hours: Decimal,
    /// Person-hours actually staffed, capped at the requirement.
    pub fulfilled_hours: Decimal,
}

/// Returns the length of a time span in hours, exact to the minute.
pub(crate) fn span_hours(start: chrono::NaiveTime, end: chrono::NaiveTime) -> Decimal {
    Decimal::from((end - start).num_minutes()) / Decimal::from(60)
}

/// Splits one demand block into ordered atomic units of `unit_minutes`.
///
/// Each unit inherits the block's role and quantity.
///
/// # Errors
///
/// * [`EngineError::InvalidUnitSize`] when `unit_minutes` is zero.
/// * [`EngineError::InvalidTimeRange`] when the window is empty or inverted.
/// * [`EngineError::UnalignedBlock`] when the window is not a positive
///   multiple of the unit size.
///
/// # Example
///
/// ```
/// use roster_engine::models::DemandBlock;
/// use roster_engine::scheduling::split;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let block = DemandBlock {
///     day: NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     role: "sales".to_string(),
///     quantity: 1,
/// };
/// let units = split(&block, 60).unwrap();
/// assert_eq!(units.len(), 4);
/// ```
pub fn split(block: &DemandBlock, unit_minutes: u32) -> EngineResult<Vec<AtomicDemand>> {
    if unit_minutes == 0 {
        return Err(EngineError::InvalidUnitSize { minutes: unit_minutes });
    }

    let window = block.window_minutes();
    if window <= 0 {
        return Err(EngineError::InvalidTimeRange {
            day: block.day,
            role: block.role.clone(),
            start: block.start_time,
            end: block.end_time,
        });
    }
    if window % i64::from(unit_minutes) != 0 {
        return Err(EngineError::UnalignedBlock {
            day: block.day,
            role: block.role.clone(),
            start: block.start_time,
            end: block.end_time,
            unit_minutes,
        });
    }

    let step = Duration::minutes(i64::from(unit_minutes));
    let count = window / i64::from(unit_minutes);
    let mut units = Vec::with_capacity(count as usize);
    let mut cursor = block.start_time;
    for _ in 0..count {
        let next = cursor + step;
        units.push(AtomicDemand {
            day: block.day,
            unit_start: cursor,
            unit_end: next,
            role: block.role.clone(),
            quantity: block.quantity,
        });
        cursor = next;
    }
    Ok(units)
}

/// Splits every block and sorts the units into the engine's fixed iteration
/// order: day ascending, unit start ascending, role ascending.
pub fn decompose(blocks: &[DemandBlock], unit_minutes: u32) -> EngineResult<Vec<AtomicDemand>> {
    let mut units = Vec::new();
    for block in blocks {
        units.extend(split(block, unit_minutes)?);
    }
    units.sort_by(|a, b| {
        (a.day, a.unit_start, a.role.as_str()).cmp(&(b.day, b.unit_start, b.role.as_str()))
    });
    Ok(units)
}

/// Sums required and fulfilled person-hours per original block.
///
/// Fulfilled headcount per unit is capped at the unit's quantity, so a
/// block can never report more fulfilled than required hours.
pub fn aggregate(
    assignments: &[Assignment],
    blocks: &[DemandBlock],
    unit_minutes: u32,
) -> EngineResult<Vec<BlockFulfillment>> {
    let staffed = headcount_by_unit(assignments);

    let mut fulfillments = Vec::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        let units = split(block, unit_minutes)?;
        let unit_len = Decimal::from(unit_minutes) / Decimal::from(60);

        let mut required = Decimal::ZERO;
        let mut fulfilled = Decimal::ZERO;
        for unit in &units {
            let headcount = staffed
                .get(&(unit.day, unit.unit_start, unit.role.clone()))
                .map(|ids| ids.len() as u32)
                .unwrap_or(0);
            required += Decimal::from(unit.quantity) * unit_len;
            fulfilled += Decimal::from(headcount.min(unit.quantity)) * unit_len;
        }
        fulfillments.push(BlockFulfillment {
            block: index,
            required_hours: required,
            fulfilled_hours: fulfilled,
        });
    }
    Ok(fulfillments)
}
