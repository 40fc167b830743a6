//! Grouped reductions of rental counts by a categorical key.
//!
//! Every key type has a fixed, ordered domain. Results always list the whole
//! domain in that order; a category with no rows carries `None` rather than a
//! zero or being left out.

use std::collections::BTreeMap;
use std::fmt;

use crate::bucket::{TimeBucket, WeatherLabel, bucketize_time, bucketize_weather};
use crate::error::{DashboardError, Result};
use crate::table::{HourlyRecord, HourlyTable};

/// A grouping key with a fixed, ordered domain.
pub trait Category: Copy + Ord + fmt::Display {
    /// Every value of the key, in display order.
    fn domain() -> Vec<Self>;
}

/// Hour of day, `0..24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hour(u8);

impl Hour {
    pub fn new(hour: i64) -> Result<Self> {
        match u8::try_from(hour) {
            Ok(h) if h < 24 => Ok(Hour(h)),
            _ => Err(DashboardError::OutOfRange(hour)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Category for Hour {
    fn domain() -> Vec<Self> {
        (0..24).map(Hour).collect()
    }
}

/// Raw `weathersit` code, `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeatherCode(u8);

impl WeatherCode {
    pub fn new(code: i64) -> Result<Self> {
        match u8::try_from(code) {
            Ok(c @ 1..=4) => Ok(WeatherCode(c)),
            _ => Err(DashboardError::UnknownCategory(code)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> WeatherLabel {
        match self.0 {
            1 => WeatherLabel::Cerah,
            2 => WeatherLabel::Mendung,
            3 => WeatherLabel::HujanRingan,
            _ => WeatherLabel::HujanDeras,
        }
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Category for WeatherCode {
    fn domain() -> Vec<Self> {
        (1..=4).map(WeatherCode).collect()
    }
}

impl Category for TimeBucket {
    fn domain() -> Vec<Self> {
        TimeBucket::ALL.to_vec()
    }
}

impl Category for WeatherLabel {
    fn domain() -> Vec<Self> {
        WeatherLabel::ALL.to_vec()
    }
}

pub fn by_hour(row: &HourlyRecord) -> Result<Hour> {
    Hour::new(i64::from(row.hour))
}

pub fn by_weather_code(row: &HourlyRecord) -> Result<WeatherCode> {
    WeatherCode::new(i64::from(row.weather_code))
}

pub fn by_time_bucket(row: &HourlyRecord) -> Result<TimeBucket> {
    bucketize_time(i64::from(row.hour))
}

pub fn by_weather_label(row: &HourlyRecord) -> Result<WeatherLabel> {
    bucketize_weather(i64::from(row.weather_code))
}

/// How a group's rental counts collapse into one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    Mean,
    Sum,
}

#[derive(Debug, Default, Clone, Copy)]
struct GroupTotals {
    rows: u64,
    rentals: u64,
}

impl Reducer {
    // Counts are summed exactly as integers, so the result does not depend on
    // row order.
    fn apply(self, totals: GroupTotals) -> f64 {
        match self {
            Reducer::Sum => totals.rentals as f64,
            Reducer::Mean => totals.rentals as f64 / totals.rows as f64,
        }
    }
}

/// Per-category statistics over the full domain of `K`, in domain order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult<K> {
    entries: Vec<(K, Option<f64>)>,
}

impl<K: Category> AggregateResult<K> {
    pub fn entries(&self) -> &[(K, Option<f64>)] {
        &self.entries
    }

    /// Statistic for `key`, `None` when the group had no rows.
    pub fn get(&self, key: K) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| *v)
    }

    /// Only the categories that had at least one row.
    pub fn observed(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.entries.iter().filter_map(|(k, v)| v.map(|v| (*k, v)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest statistic present, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.observed().map(|(_, v)| v).reduce(f64::max)
    }
}

/// Groups `table` by `key_fn` and reduces each group's rental counts.
///
/// # Errors
///
/// Fails with the first error `key_fn` returns; no rows are skipped.
pub fn aggregate<K, F>(table: &HourlyTable, key_fn: F, reducer: Reducer) -> Result<AggregateResult<K>>
where
    K: Category,
    F: Fn(&HourlyRecord) -> Result<K>,
{
    let mut groups: BTreeMap<K, GroupTotals> = BTreeMap::new();

    for row in table {
        let key = key_fn(row)?;
        let totals = groups.entry(key).or_default();
        totals.rows += 1;
        totals.rentals += u64::from(row.rental_count);
    }

    let entries = K::domain()
        .into_iter()
        .map(|k| (k, groups.get(&k).map(|t| reducer.apply(*t))))
        .collect();

    Ok(AggregateResult { entries })
}
