#![allow(dead_code)]

use chrono::NaiveDate;
use depro_domain::LedgerEntry;
use uuid::Uuid;

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

pub fn entry(product_id: Uuid, d: u32, order: i64, planned: i64, shipped: i64) -> LedgerEntry {
    LedgerEntry::new(product_id, day(d), day(d), order)
        .with_planned(planned)
        .with_shipped(shipped)
}
