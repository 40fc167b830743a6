//! Environment-driven configuration.
//!
//! Values come from the process environment (after `.env` has been loaded)
//! and can be overridden by command-line flags.

use crate::loader::DataSources;

pub const DEFAULT_DAY_SOURCE: &str = "day.csv";
pub const DEFAULT_HOUR_SOURCE: &str = "hour.csv";
pub const DEFAULT_LOG_FILE: &str = "logs/bike_rental_dashboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub sources: DataSources,
    pub log_file_path: String,
}

impl DashboardConfig {
    /// Reads `DAY_DATA_SOURCE`, `HOUR_DATA_SOURCE` and `LOG_FILE_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            sources: DataSources {
                day: get("DAY_DATA_SOURCE", DEFAULT_DAY_SOURCE),
                hour: get("HOUR_DATA_SOURCE", DEFAULT_HOUR_SOURCE),
            },
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE),
        }
    }

    /// Replaces the source locations with any that were given explicitly.
    pub fn with_overrides(mut self, day: Option<String>, hour: Option<String>) -> Self {
        if let Some(day) = day {
            self.sources.day = day;
        }
        if let Some(hour) = hour {
            self.sources.hour = hour;
        }
        self
    }
}
