//! Date-window handling for seasonal prices and discount rules
//!
//! Price rows and discount rules are valid over an inclusive date range.
//! Overlap detection matters: two prices for the same (apart, product, season)
//! tuple whose windows overlap are a data-integrity violation upstream.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: String, end: String },
}

/// An inclusive date range `[start, end]`
///
/// Both endpoints are business dates (no time component); a single-day window
/// has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the range contains the given date (inclusive bounds)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if this range shares at least one day with another
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days in the range, inclusive of both endpoints
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_range_creation_rejects_inverted() {
        let result = DateRange::new(d(2025, 6, 1), d(2025, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(d(2025, 1, 1), d(2025, 6, 30)).unwrap();

        assert!(range.contains(d(2025, 1, 1)));
        assert!(range.contains(d(2025, 6, 30)));
        assert!(range.contains(d(2025, 3, 15)));
        assert!(!range.contains(d(2025, 7, 1)));
    }

    #[test]
    fn test_overlap() {
        let a = DateRange::new(d(2025, 1, 1), d(2025, 6, 30)).unwrap();
        let b = DateRange::new(d(2025, 6, 30), d(2025, 12, 31)).unwrap();
        let c = DateRange::new(d(2025, 7, 1), d(2025, 12, 31)).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(d(2025, 3, 1), d(2025, 3, 1)).unwrap();
        assert_eq!(range.days(), 1);
        assert!(range.contains(d(2025, 3, 1)));
    }
}
