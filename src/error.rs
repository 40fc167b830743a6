//! Error types for the dashboard pipeline.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Top-level error for loading, filtering, and aggregating rental data.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("data source `{name}` could not be loaded")]
    DataSource {
        name: String,
        #[source]
        source: DataSourceError,
    },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("hour {0} is outside 0..24")]
    OutOfRange(i64),

    #[error("unknown weather code {0}, expected 1-4")]
    UnknownCategory(i64),
}

impl DashboardError {
    pub(crate) fn data_source(name: &str, source: impl Into<DataSourceError>) -> Self {
        DashboardError::DataSource {
            name: name.to_string(),
            source: source.into(),
        }
    }
}

/// Why a tabular source could not be read or parsed.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gzip decompression failed: {0}")]
    Decompress(std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: invalid value {value:?} in column `{column}`")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}
