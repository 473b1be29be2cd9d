//! Progress series primitives shared by aggregation and the carry fold.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Selects which running-balance series a recomputation maintains.
pub enum ProgressVariant {
    /// Progress against the plan, with actual shipments taking over once a
    /// date has any.
    PlannedProgress,
    /// Shortfall/surplus of actual shipments against orders, plan ignored.
    ShippedRemaining,
}

impl fmt::Display for ProgressVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgressVariant::PlannedProgress => "planned-progress",
            ProgressVariant::ShippedRemaining => "shipped-remaining",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Aggregated activity for one delivery date.
pub struct DayTotals {
    pub date: NaiveDate,
    pub order_total: i64,
    pub planned_total: i64,
    pub shipped_total: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// The carried balance computed for one delivery date.
pub struct DayValue {
    pub date: NaiveDate,
    pub value: i64,
}
