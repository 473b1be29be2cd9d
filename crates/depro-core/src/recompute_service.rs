//! Recomputation of the running progress series for a product over a range.

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use depro_domain::{DateRange, ProgressVariant};

use crate::{
    aggregate::aggregate_days,
    carry::roll_forward,
    options::RecomputeOptions,
    store::{LedgerStore, RangeLease},
    CoreError,
};

/// Result of a committed recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeOutcome {
    pub rows_updated: usize,
}

/// Recomputes the two running-balance series over locked date ranges.
///
/// Each invocation is one transaction: seed and range rows are locked before
/// any read, the carry is rolled left to right over the aggregated days, and
/// every entry sharing a date receives that date's value on commit. A failure
/// at any point leaves the ledger exactly as it was.
pub struct RecomputeService;

impl RecomputeService {
    /// Recomputes `variant` for `product_id` over `[start, end]` inclusive.
    ///
    /// The seed is the stored value of the matching series on the single
    /// entry dated the day before `start` (0 when none exists). Inverted
    /// ranges are rejected before any lock is taken.
    pub fn run(
        store: &dyn LedgerStore,
        product_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        variant: ProgressVariant,
        options: &RecomputeOptions,
    ) -> Result<RecomputeOutcome, CoreError> {
        let range = DateRange::new(start, end)?;
        let mut lease = store.lock_range(product_id, range, options.lock_timeout)?;
        let seed = lease
            .prior_entry()
            .map(|entry| entry.series_value(variant))
            .unwrap_or(0);
        let days = aggregate_days(lease.entries());
        debug!(
            "recompute {} for product {} over {}: seed {}, {} active day(s)",
            variant,
            product_id,
            range,
            seed,
            days.len()
        );
        let values = roll_forward(seed, &days, variant)?;
        lease.stage_series(variant, &values);
        let rows_updated = lease.commit()?;
        info!(
            "recompute {} for product {} over {} committed, {} row(s) updated",
            variant, product_id, range, rows_updated
        );
        Ok(RecomputeOutcome { rows_updated })
    }

    /// Recomputes `variant` over the range for every product the store knows,
    /// one transaction per product. The first failure aborts the remaining
    /// products; ledgers already committed stay committed.
    pub fn run_all(
        store: &dyn LedgerStore,
        start: NaiveDate,
        end: NaiveDate,
        variant: ProgressVariant,
        options: &RecomputeOptions,
    ) -> Result<Vec<(Uuid, RecomputeOutcome)>, CoreError> {
        let mut outcomes = Vec::new();
        for product_id in store.product_ids()? {
            let outcome = Self::run(store, product_id, start, end, variant, options)?;
            outcomes.push((product_id, outcome));
        }
        Ok(outcomes)
    }

    /// Zeroes `planned_quantity` on every non-cancelled entry of the product
    /// in range, under the same locking discipline as a recomputation.
    pub fn reset_planned(
        store: &dyn LedgerStore,
        product_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        options: &RecomputeOptions,
    ) -> Result<usize, CoreError> {
        let range = DateRange::new(start, end)?;
        let mut lease = store.lock_range(product_id, range, options.lock_timeout)?;
        lease.stage_planned_reset();
        let rows_updated = lease.commit()?;
        info!(
            "planned quantities reset for product {} over {}, {} row(s) updated",
            product_id, range, rows_updated
        );
        Ok(rows_updated)
    }
}
