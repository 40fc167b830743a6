//! CSV loading for the daily and hourly rental sources.

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::info;

use crate::error::{DashboardError, DataSourceError, Result};
use crate::source::read_source;
use crate::table::{DailyRecord, DailyTable, HourlyRecord, HourlyTable};

pub const DAY_SOURCE: &str = "day";
pub const HOUR_SOURCE: &str = "hour";

const DAILY_COLUMNS: &[&str] = &["dteday", "cnt"];
const HOURLY_COLUMNS: &[&str] = &["dteday", "hr", "weathersit", "cnt"];

/// Where the two sources live: file paths or HTTP(S) URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub day: String,
    pub hour: String,
}

/// Both tables, loaded once and shared read-only by every pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub daily: DailyTable,
    pub hourly: HourlyTable,
}

impl Dataset {
    /// Selectable date span: the daily table's span, or the hourly one when
    /// the daily table is empty.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.daily.date_span().or_else(|| self.hourly.date_span())
    }
}

#[derive(Debug, Deserialize)]
struct RawDailyRow {
    dteday: String,
    cnt: i64,
}

#[derive(Debug, Deserialize)]
struct RawHourlyRow {
    dteday: String,
    hr: i64,
    weathersit: i64,
    cnt: i64,
}

/// Reads and parses both sources.
///
/// # Errors
///
/// [`DashboardError::DataSource`] naming the failing source if it cannot be
/// read, lacks a required column, or holds a malformed or out-of-domain value.
#[tracing::instrument(skip(sources), fields(day = %sources.day, hour = %sources.hour))]
pub fn load(sources: &DataSources) -> Result<Dataset> {
    let day_bytes = read_source(&sources.day)
        .map_err(|e| DashboardError::data_source(DAY_SOURCE, e))?;
    let daily = parse_daily(&day_bytes)?;

    let hour_bytes = read_source(&sources.hour)
        .map_err(|e| DashboardError::data_source(HOUR_SOURCE, e))?;
    let hourly = parse_hourly(&hour_bytes)?;

    let dataset = Dataset { daily, hourly };
    match dataset.date_span() {
        Some((min, max)) => info!(
            days = dataset.daily.len(),
            hours = dataset.hourly.len(),
            min = %min,
            max = %max,
            "Dataset loaded"
        ),
        None => info!("Dataset loaded with no rows"),
    }
    Ok(dataset)
}

/// Parses the daily source. Only `dteday` and `cnt` are kept.
pub fn parse_daily(bytes: &[u8]) -> Result<DailyTable> {
    parse_daily_rows(bytes).map_err(|e| DashboardError::data_source(DAY_SOURCE, e))
}

/// Parses the hourly source, validating `hr` and `weathersit` domains.
pub fn parse_hourly(bytes: &[u8]) -> Result<HourlyTable> {
    parse_hourly_rows(bytes).map_err(|e| DashboardError::data_source(HOUR_SOURCE, e))
}

fn parse_daily_rows(bytes: &[u8]) -> std::result::Result<DailyTable, DataSourceError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);
    let headers = rdr.headers()?.clone();
    require_columns(&headers, DAILY_COLUMNS)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);
        let raw: RawDailyRow = record.deserialize(Some(&headers))?;

        rows.push(DailyRecord {
            date: parse_date(&raw.dteday, line)?,
            rental_count: parse_count(raw.cnt, line)?,
        });
    }

    Ok(DailyTable::new(rows))
}

fn parse_hourly_rows(bytes: &[u8]) -> std::result::Result<HourlyTable, DataSourceError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);
    let headers = rdr.headers()?.clone();
    require_columns(&headers, HOURLY_COLUMNS)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);
        let raw: RawHourlyRow = record.deserialize(Some(&headers))?;

        let hour = match u8::try_from(raw.hr) {
            Ok(h) if h < 24 => h,
            _ => return Err(invalid(line, "hr", raw.hr)),
        };
        let weather_code = match u8::try_from(raw.weathersit) {
            Ok(c @ 1..=4) => c,
            _ => return Err(invalid(line, "weathersit", raw.weathersit)),
        };

        rows.push(HourlyRecord {
            date: parse_date(&raw.dteday, line)?,
            hour,
            weather_code,
            rental_count: parse_count(raw.cnt, line)?,
        });
    }

    Ok(HourlyTable::new(rows))
}

fn require_columns(
    headers: &StringRecord,
    required: &[&'static str],
) -> std::result::Result<(), DataSourceError> {
    match required.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        Some(missing) => Err(DataSourceError::MissingColumn(*missing)),
        None => Ok(()),
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn invalid(line: u64, column: &'static str, value: impl ToString) -> DataSourceError {
    DataSourceError::InvalidValue {
        line,
        column,
        value: value.to_string(),
    }
}

fn parse_count(cnt: i64, line: u64) -> std::result::Result<u32, DataSourceError> {
    u32::try_from(cnt).map_err(|_| invalid(line, "cnt", cnt))
}

/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, or a `YYYY-MM-DD HH:MM:SS` timestamp
/// whose time part is dropped.
fn parse_date(value: &str, line: u64) -> std::result::Result<NaiveDate, DataSourceError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| invalid(line, "dteday", value))
}
