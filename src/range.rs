//! Inclusive date ranges and the range filter.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::table::{Dated, Table};

/// An inclusive `[start, end]` window of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, failing with [`DashboardError::InvalidRange`] when
    /// `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a `(min, max)` span such as [`Table::date_span`] returns.
    pub fn from_span((start, end): (NaiveDate, NaiveDate)) -> Result<Self> {
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Overlap of two ranges, `None` when they are disjoint.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    /// Number of calendar days covered, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl<R: Dated + Clone> Table<R> {
    /// Rows whose date lies within `range`, in their original order.
    ///
    /// A range outside the table's span yields an empty table.
    pub fn filter(&self, range: &DateRange) -> Table<R> {
        let filtered: Table<R> = self
            .iter()
            .filter(|r| range.contains(r.date()))
            .cloned()
            .collect();
        debug!(
            start = %range.start,
            end = %range.end,
            input = self.len(),
            output = filtered.len(),
            "Range filter applied"
        );
        filtered
    }
}
