//! The carry fold that turns daily totals into running balances.

use depro_domain::{DayTotals, DayValue, ProgressVariant};

use crate::CoreError;

/// Folds the aggregated days, ascending by date, into one computed value per
/// date.
///
/// For [`ProgressVariant::PlannedProgress`], actual shipments supersede the
/// plan on any date that has them; otherwise the plan stands in for the
/// expected shipment. [`ProgressVariant::ShippedRemaining`] tracks shipments
/// against orders only.
///
/// Arithmetic is checked: a carry leaving the `i64` range aborts with
/// [`CoreError::Overflow`] before anything is written.
pub fn roll_forward(
    seed: i64,
    days: &[DayTotals],
    variant: ProgressVariant,
) -> Result<Vec<DayValue>, CoreError> {
    let mut carry = seed;
    let mut values = Vec::with_capacity(days.len());
    for day in days {
        let basis = match variant {
            ProgressVariant::PlannedProgress if day.shipped_total > 0 => day.shipped_total,
            ProgressVariant::PlannedProgress => day.planned_total,
            ProgressVariant::ShippedRemaining => day.shipped_total,
        };
        carry = basis
            .checked_sub(day.order_total)
            .and_then(|delta| carry.checked_add(delta))
            .ok_or_else(|| CoreError::Overflow(format!("carry out of range at {}", day.date)))?;
        values.push(DayValue {
            date: day.date,
            value: carry,
        });
    }
    Ok(values)
}
