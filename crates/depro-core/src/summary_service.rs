//! Aggregation helpers for ledger-wide progress reporting.

use chrono::NaiveDate;

use depro_domain::{EntryStatus, LedgerEntry, ProgressSummary};

/// Entries due within this many days of the reference date count as urgent.
const URGENT_WINDOW_DAYS: i64 = 3;

/// Aggregates entry populations into operator-facing counters.
pub struct SummaryService;

impl SummaryService {
    /// Summarizes the given entries as of `reference`. Cancelled entries are
    /// excluded from every counter; fully shipped entries are neither delayed
    /// nor urgent no matter their date.
    pub fn progress_summary(entries: &[LedgerEntry], reference: NaiveDate) -> ProgressSummary {
        let mut summary = ProgressSummary::default();
        for entry in entries {
            if entry.is_cancelled() {
                continue;
            }
            summary.total_orders += 1;
            match entry.status {
                EntryStatus::Unshipped => summary.unshipped += 1,
                EntryStatus::PartiallyShipped => summary.partially_shipped += 1,
                EntryStatus::Shipped => summary.shipped += 1,
                EntryStatus::Cancelled => {}
            }
            if entry.status != EntryStatus::Shipped {
                let due_in = (entry.delivery_date - reference).num_days();
                if due_in < 0 {
                    summary.delayed += 1;
                } else if due_in <= URGENT_WINDOW_DAYS {
                    summary.urgent += 1;
                }
            }
            summary.total_quantity += entry.order_quantity;
            summary.total_shipped += entry.shipped_quantity;
            summary.total_remaining += entry.remaining_quantity();
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn entry(day: u32, order: i64) -> LedgerEntry {
        let due = NaiveDate::from_ymd_opt(2025, 9, day).unwrap();
        LedgerEntry::new(Uuid::new_v4(), due, due, order)
    }

    #[test]
    fn counters_split_by_status_and_quantities_add_up() {
        let reference = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
        let untouched = entry(20, 10);
        let mut partial = entry(21, 10);
        partial.apply_shipment(4);
        let mut done = entry(22, 10);
        done.apply_shipment(10);
        let mut cancelled = entry(23, 10);
        cancelled.status = EntryStatus::Cancelled;

        let summary =
            SummaryService::progress_summary(&[untouched, partial, done, cancelled], reference);
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.unshipped, 1);
        assert_eq!(summary.partially_shipped, 1);
        assert_eq!(summary.shipped, 1);
        assert_eq!(summary.total_quantity, 30);
        assert_eq!(summary.total_shipped, 14);
        assert_eq!(summary.total_remaining, 16);
    }

    #[test]
    fn unshipped_entries_past_due_are_delayed() {
        let reference = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
        let summary = SummaryService::progress_summary(&[entry(9, 5)], reference);
        assert_eq!(summary.delayed, 1);
        assert_eq!(summary.urgent, 0);
    }

    #[test]
    fn the_urgency_window_spans_today_through_three_days_out() {
        let reference = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
        let summary = SummaryService::progress_summary(
            &[entry(10, 5), entry(13, 5), entry(14, 5)],
            reference,
        );
        assert_eq!(summary.urgent, 2);
        assert_eq!(summary.delayed, 0);
    }

    #[test]
    fn fully_shipped_entries_are_never_delayed_or_urgent() {
        let reference = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
        let mut done = entry(1, 5);
        done.apply_shipment(5);
        let summary = SummaryService::progress_summary(&[done], reference);
        assert_eq!(summary.delayed, 0);
        assert_eq!(summary.urgent, 0);
    }
}
