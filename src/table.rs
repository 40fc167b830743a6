//! In-memory rental tables.

use chrono::NaiveDate;
use serde::Serialize;

/// One row of the hourly source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    pub hour: u8,
    pub weather_code: u8,
    pub rental_count: u32,
}

/// One row of the daily source. Descriptive columns are not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub rental_count: u32,
}

/// Records that carry a calendar date and can be range-filtered.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for HourlyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for DailyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// An immutable, ordered collection of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<R> {
    rows: Vec<R>,
}

pub type HourlyTable = Table<HourlyRecord>;
pub type DailyTable = Table<DailyRecord>;

impl<R> Table<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<R: Dated> Table<R> {
    /// Earliest and latest dates in the table, or `None` when empty.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.rows.iter().map(Dated::date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

impl<R> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl DailyTable {
    /// Sum of `rental_count` over all rows.
    pub fn total_rentals(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.rental_count)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32, cnt: u32) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            rental_count: cnt,
        }
    }

    #[test]
    fn test_date_span_empty() {
        let table: DailyTable = Table::new(vec![]);
        assert_eq!(table.date_span(), None);
    }

    #[test]
    fn test_date_span_unsorted_rows() {
        let table: DailyTable = vec![day(2011, 3, 5, 1), day(2011, 1, 9, 1), day(2012, 2, 1, 1)]
            .into_iter()
            .collect();

        assert_eq!(
            table.date_span(),
            Some((
                NaiveDate::from_ymd_opt(2011, 1, 9).unwrap(),
                NaiveDate::from_ymd_opt(2012, 2, 1).unwrap()
            ))
        );
    }

    #[test]
    fn test_total_rentals() {
        let table = Table::new(vec![day(2011, 1, 1, 985), day(2011, 1, 2, 801)]);
        assert_eq!(table.total_rentals(), 1786);
    }
}
