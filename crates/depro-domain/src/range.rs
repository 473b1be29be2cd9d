//! Inclusive calendar ranges used to scope recomputations.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// An inclusive `[start, end]` span of delivery dates.
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The day immediately before the range, where the carried-in balance
    /// lives.
    pub fn prior_day(&self) -> NaiveDate {
        self.start - Duration::days(1)
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateRange`] values.
pub enum DateRangeError {
    InvalidRange,
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRangeError::InvalidRange => f.write_str("range start must not be after its end"),
        }
    }
}

impl std::error::Error for DateRangeError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert_eq!(
            DateRange::new(day(10), day(9)),
            Err(DateRangeError::InvalidRange)
        );
    }

    #[test]
    fn single_day_ranges_are_valid() {
        let range = DateRange::new(day(10), day(10)).expect("single-day range");
        assert!(range.contains(day(10)));
        assert_eq!(range, DateRange::single(day(10)));
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::new(day(5), day(8)).unwrap();
        assert!(range.contains(day(5)));
        assert!(range.contains(day(8)));
        assert!(!range.contains(day(4)));
        assert!(!range.contains(day(9)));
    }

    #[test]
    fn prior_day_precedes_start() {
        let range = DateRange::new(day(5), day(8)).unwrap();
        assert_eq!(range.prior_day(), day(4));
    }

    #[test]
    fn overlap_requires_a_shared_date() {
        let left = DateRange::new(day(1), day(5)).unwrap();
        let touching = DateRange::new(day(5), day(9)).unwrap();
        let disjoint = DateRange::new(day(6), day(9)).unwrap();
        assert!(left.overlaps(&touching));
        assert!(touching.overlaps(&left));
        assert!(!left.overlaps(&disjoint));
    }
}
