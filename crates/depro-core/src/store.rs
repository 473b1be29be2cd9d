//! Storage abstraction the recomputation engine runs against.

use std::time::Duration;

use depro_domain::{DateRange, DayValue, EntryStatus, LedgerEntry, ProgressVariant};
use uuid::Uuid;

use crate::CoreError;

/// Abstraction over transactional ledger stores.
///
/// The engine holds no state of its own between calls; everything it reads
/// and writes goes through one [`RangeLease`] per invocation.
pub trait LedgerStore: Send + Sync {
    /// Opens a write transaction holding exclusive locks on the prior-day
    /// seed row and on every entry of `product_id` whose delivery date falls
    /// inside `range`.
    ///
    /// Blocks while another lease on the same product overlaps the locked
    /// span (the requested range extended by the prior day), and fails with
    /// [`CoreError::LockTimeout`] once `timeout` elapses. Products with no
    /// ledger entries at all are rejected with [`CoreError::ProductNotFound`]
    /// before any lock is taken.
    fn lock_range(
        &self,
        product_id: Uuid,
        range: DateRange,
        timeout: Duration,
    ) -> Result<Box<dyn RangeLease + '_>, CoreError>;

    /// Distinct products that currently have ledger entries, in a stable
    /// order.
    fn product_ids(&self) -> Result<Vec<Uuid>, CoreError>;
}

/// One open, exclusively locked transaction over a product's date range.
///
/// Writes are staged and only become visible on [`RangeLease::commit`];
/// dropping the lease without committing rolls everything back and releases
/// the locks.
pub trait RangeLease {
    /// The single entry dated the day before the range start (lowest id when
    /// several share that date), if any. Already covered by the lease.
    fn prior_entry(&self) -> Option<&LedgerEntry>;

    /// Non-cancelled entries inside the range, ascending by
    /// `(delivery_date, id)`.
    fn entries(&self) -> &[LedgerEntry];

    /// Stages a broadcast write: each day's value lands on every entry that
    /// shares the date.
    fn stage_series(&mut self, variant: ProgressVariant, values: &[DayValue]);

    /// Stages `planned_quantity = 0` on every non-cancelled entry in range.
    fn stage_planned_reset(&mut self);

    /// Applies the staged writes, releases the locks, and reports how many
    /// entries changed.
    fn commit(self: Box<Self>) -> Result<usize, CoreError>;
}

/// Detects inconsistent quantity/status combinations within a set of entries.
pub fn entry_warnings(entries: &[LedgerEntry]) -> Vec<String> {
    let mut warnings = Vec::new();
    for entry in entries {
        if entry.order_quantity < 0 {
            warnings.push(format!(
                "entry {} has a negative order quantity ({})",
                entry.id, entry.order_quantity
            ));
        }
        if entry.shipped_quantity > 0 && entry.status == EntryStatus::Unshipped {
            warnings.push(format!(
                "entry {} has shipments recorded but is still marked {}",
                entry.id, entry.status
            ));
        }
        if entry.status == EntryStatus::Shipped && entry.remaining_quantity() > 0 {
            warnings.push(format!(
                "entry {} is marked {} with {} still remaining",
                entry.id,
                entry.status,
                entry.remaining_quantity()
            ));
        }
        if entry.delivery_date < entry.order_date {
            warnings.push(format!(
                "entry {} is due {} before its order date {}",
                entry.id, entry.delivery_date, entry.order_date
            ));
        }
    }
    warnings
}
