//! Roll-up counters over a population of ledger entries.

use serde::{Deserialize, Serialize};

/// Operator-facing totals for a set of ledger entries. Cancelled entries are
/// excluded from every counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressSummary {
    pub total_orders: usize,
    pub unshipped: usize,
    pub partially_shipped: usize,
    pub shipped: usize,
    /// Entries past their delivery date without full shipment.
    pub delayed: usize,
    /// Entries due within the urgency window without full shipment.
    pub urgent: usize,
    pub total_quantity: i64,
    pub total_shipped: i64,
    pub total_remaining: i64,
}
