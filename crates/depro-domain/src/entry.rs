//! Domain models for delivery-progress ledger entries.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::series::ProgressVariant;

/// One row of demand/supply activity for a product on a delivery date.
///
/// Several entries may share the same `(product_id, delivery_date)`; the two
/// computed series carry the identical value on every entry of a date once a
/// recomputation has covered it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub order_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub order_quantity: i64,
    #[serde(default)]
    pub planned_quantity: i64,
    #[serde(default)]
    pub shipped_quantity: i64,
    #[serde(default)]
    pub planned_progress_quantity: Option<i64>,
    #[serde(default)]
    pub shipped_remaining_quantity: i64,
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_location: Option<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(
        product_id: Uuid,
        order_date: NaiveDate,
        delivery_date: NaiveDate,
        order_quantity: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_id,
            order_date,
            delivery_date,
            order_quantity,
            planned_quantity: 0,
            shipped_quantity: 0,
            planned_progress_quantity: None,
            shipped_remaining_quantity: 0,
            status: EntryStatus::Unshipped,
            customer_code: None,
            customer_name: None,
            delivery_location: None,
            priority: 0,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_planned(mut self, planned_quantity: i64) -> Self {
        self.planned_quantity = planned_quantity;
        self
    }

    pub fn with_shipped(mut self, shipped_quantity: i64) -> Self {
        self.shipped_quantity = shipped_quantity;
        self
    }

    /// Quantity still owed against the order. Always derived from
    /// `order_quantity` and `shipped_quantity`, never stored.
    pub fn remaining_quantity(&self) -> i64 {
        self.order_quantity - self.shipped_quantity
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, EntryStatus::Cancelled)
    }

    /// Stored value of the requested computed series, 0 while unset.
    pub fn series_value(&self, variant: ProgressVariant) -> i64 {
        match variant {
            ProgressVariant::PlannedProgress => self.planned_progress_quantity.unwrap_or(0),
            ProgressVariant::ShippedRemaining => self.shipped_remaining_quantity,
        }
    }

    pub fn set_series_value(&mut self, variant: ProgressVariant, value: i64) {
        match variant {
            ProgressVariant::PlannedProgress => self.planned_progress_quantity = Some(value),
            ProgressVariant::ShippedRemaining => self.shipped_remaining_quantity = value,
        }
        self.touch();
    }

    /// Books a shipment against the entry and rolls the status forward:
    /// fully covered orders become [`EntryStatus::Shipped`], anything shipped
    /// at all becomes [`EntryStatus::PartiallyShipped`].
    pub fn apply_shipment(&mut self, quantity: i64) {
        self.shipped_quantity += quantity;
        if self.shipped_quantity >= self.order_quantity {
            self.status = EntryStatus::Shipped;
        } else if self.shipped_quantity > 0 {
            self.status = EntryStatus::PartiallyShipped;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
/// Shipment lifecycle state of a ledger entry.
pub enum EntryStatus {
    #[default]
    Unshipped,
    PartiallyShipped,
    Shipped,
    Cancelled,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryStatus::Unshipped => "Unshipped",
            EntryStatus::PartiallyShipped => "Partially Shipped",
            EntryStatus::Shipped => "Shipped",
            EntryStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}
