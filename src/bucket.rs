//! Derived categorical dimensions: time-of-day buckets and weather labels.

use serde::Serialize;
use std::fmt;

use crate::error::{DashboardError, Result};

/// Part of the day an hour falls into.
///
/// | Hours   | Bucket     |
/// |---------|------------|
/// | 0 - 5   | Dini Hari  |
/// | 6 - 11  | Pagi Hari  |
/// | 12 - 15 | Siang Hari |
/// | 16 - 18 | Sore Hari  |
/// | 19 - 23 | Malam Hari |
///
/// Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TimeBucket {
    #[serde(rename = "Dini Hari")]
    DiniHari,
    #[serde(rename = "Pagi Hari")]
    PagiHari,
    #[serde(rename = "Siang Hari")]
    SiangHari,
    #[serde(rename = "Sore Hari")]
    SoreHari,
    #[serde(rename = "Malam Hari")]
    MalamHari,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 5] = [
        TimeBucket::DiniHari,
        TimeBucket::PagiHari,
        TimeBucket::SiangHari,
        TimeBucket::SoreHari,
        TimeBucket::MalamHari,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeBucket::DiniHari => "Dini Hari",
            TimeBucket::PagiHari => "Pagi Hari",
            TimeBucket::SiangHari => "Siang Hari",
            TimeBucket::SoreHari => "Sore Hari",
            TimeBucket::MalamHari => "Malam Hari",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Human-readable weather condition for a `weathersit` code.
///
/// Code 4 covers heavy rain, ice pellets, thunderstorms and snow; it is always
/// labeled `Hujan Deras`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WeatherLabel {
    #[serde(rename = "Cerah")]
    Cerah,
    #[serde(rename = "Mendung")]
    Mendung,
    #[serde(rename = "Hujan Ringan")]
    HujanRingan,
    #[serde(rename = "Hujan Deras")]
    HujanDeras,
}

impl WeatherLabel {
    pub const ALL: [WeatherLabel; 4] = [
        WeatherLabel::Cerah,
        WeatherLabel::Mendung,
        WeatherLabel::HujanRingan,
        WeatherLabel::HujanDeras,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WeatherLabel::Cerah => "Cerah",
            WeatherLabel::Mendung => "Mendung",
            WeatherLabel::HujanRingan => "Hujan Ringan",
            WeatherLabel::HujanDeras => "Hujan Deras",
        }
    }

    /// The `weathersit` code this label stands for.
    pub fn code(self) -> u8 {
        match self {
            WeatherLabel::Cerah => 1,
            WeatherLabel::Mendung => 2,
            WeatherLabel::HujanRingan => 3,
            WeatherLabel::HujanDeras => 4,
        }
    }
}

impl fmt::Display for WeatherLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps an hour of day to its [`TimeBucket`].
///
/// # Errors
///
/// [`DashboardError::OutOfRange`] if `hour` is outside `0..24`.
pub fn bucketize_time(hour: i64) -> Result<TimeBucket> {
    match hour {
        0..=5 => Ok(TimeBucket::DiniHari),
        6..=11 => Ok(TimeBucket::PagiHari),
        12..=15 => Ok(TimeBucket::SiangHari),
        16..=18 => Ok(TimeBucket::SoreHari),
        19..=23 => Ok(TimeBucket::MalamHari),
        _ => Err(DashboardError::OutOfRange(hour)),
    }
}

/// Maps a `weathersit` code to its [`WeatherLabel`].
///
/// # Errors
///
/// [`DashboardError::UnknownCategory`] for anything outside `1..=4`.
pub fn bucketize_weather(code: i64) -> Result<WeatherLabel> {
    match code {
        1 => Ok(WeatherLabel::Cerah),
        2 => Ok(WeatherLabel::Mendung),
        3 => Ok(WeatherLabel::HujanRingan),
        4 => Ok(WeatherLabel::HujanDeras),
        _ => Err(DashboardError::UnknownCategory(code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bucket_boundaries() {
        assert_eq!(bucketize_time(0).unwrap(), TimeBucket::DiniHari);
        assert_eq!(bucketize_time(5).unwrap(), TimeBucket::DiniHari);
        assert_eq!(bucketize_time(6).unwrap(), TimeBucket::PagiHari);
        assert_eq!(bucketize_time(11).unwrap(), TimeBucket::PagiHari);
        assert_eq!(bucketize_time(12).unwrap(), TimeBucket::SiangHari);
        assert_eq!(bucketize_time(15).unwrap(), TimeBucket::SiangHari);
        assert_eq!(bucketize_time(16).unwrap(), TimeBucket::SoreHari);
        assert_eq!(bucketize_time(18).unwrap(), TimeBucket::SoreHari);
        assert_eq!(bucketize_time(19).unwrap(), TimeBucket::MalamHari);
        assert_eq!(bucketize_time(23).unwrap(), TimeBucket::MalamHari);
    }

    #[test]
    fn test_time_bucket_partitions_day() {
        let mut counts = [0usize; 5];
        for h in 0..24 {
            let bucket = bucketize_time(h).unwrap();
            let idx = TimeBucket::ALL.iter().position(|b| *b == bucket).unwrap();
            counts[idx] += 1;
        }
        assert_eq!(counts, [6, 6, 4, 3, 5]);
    }

    #[test]
    fn test_time_bucket_out_of_range() {
        assert!(matches!(bucketize_time(-1), Err(DashboardError::OutOfRange(-1))));
        assert!(matches!(bucketize_time(24), Err(DashboardError::OutOfRange(24))));
    }

    #[test]
    fn test_weather_labels() {
        assert_eq!(bucketize_weather(1).unwrap(), WeatherLabel::Cerah);
        assert_eq!(bucketize_weather(2).unwrap(), WeatherLabel::Mendung);
        assert_eq!(bucketize_weather(3).unwrap(), WeatherLabel::HujanRingan);
        assert_eq!(bucketize_weather(4).unwrap(), WeatherLabel::HujanDeras);
    }

    #[test]
    fn test_weather_unknown_codes() {
        for code in [0, 5, -3, 99] {
            assert!(matches!(
                bucketize_weather(code),
                Err(DashboardError::UnknownCategory(c)) if c == code
            ));
        }
    }

    #[test]
    fn test_weather_code_round_trip() {
        for label in WeatherLabel::ALL {
            assert_eq!(bucketize_weather(i64::from(label.code())).unwrap(), label);
        }
    }

    #[test]
    fn test_labels_serialize_as_display_text() {
        assert_eq!(serde_json::to_string(&TimeBucket::SoreHari).unwrap(), "\"Sore Hari\"");
        assert_eq!(
            serde_json::to_string(&WeatherLabel::HujanRingan).unwrap(),
            "\"Hujan Ringan\""
        );
        assert_eq!(TimeBucket::MalamHari.to_string(), "Malam Hari");
    }
}
