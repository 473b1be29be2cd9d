//! Collapses same-day ledger entries into daily activity totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use depro_domain::{DayTotals, LedgerEntry};

/// Groups entries by delivery date and sums their order/planned/shipped
/// quantities, ascending by date.
///
/// Dates with no entries are absent from the output — the carry fold never
/// sees them. Cancelled entries contribute nothing.
pub fn aggregate_days(entries: &[LedgerEntry]) -> Vec<DayTotals> {
    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for entry in entries {
        if entry.is_cancelled() {
            continue;
        }
        let slot = days.entry(entry.delivery_date).or_insert(DayTotals {
            date: entry.delivery_date,
            order_total: 0,
            planned_total: 0,
            shipped_total: 0,
        });
        slot.order_total += entry.order_quantity;
        slot.planned_total += entry.planned_quantity;
        slot.shipped_total += entry.shipped_quantity;
    }
    days.into_values().collect()
}
