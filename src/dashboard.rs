//! Assembles the fixed set of dashboard charts for a date range.

use serde::Serialize;
use tracing::info;

use crate::aggregate::{
    AggregateResult, Category, Reducer, aggregate, by_hour, by_time_bucket, by_weather_code,
    by_weather_label,
};
use crate::error::Result;
use crate::loader::Dataset;
use crate::range::DateRange;

const HOURLY_INSIGHT: &str = "\
Puncak penyewaan terjadi sekitar pukul 7-9 pagi dan 17-19 sore.
Jam 0-5 pagi memiliki penyewaan sangat rendah.
Setelah puncak pagi, penyewaan tetap cukup stabil dari pukul 10 hingga 15.";

const WEATHER_INSIGHT: &str = "\
Penyewaan tertinggi terjadi saat cuaca cerah.
Saat mendung atau hujan ringan, penyewaan turun cukup signifikan.
Saat hujan deras, penyewaan paling rendah.";

const TIME_BUCKET_INSIGHT: &str = "\
Pagi dan sore hari menyumbang porsi penyewaan terbesar, sejalan dengan jam berangkat dan pulang kerja.
Dini hari menyumbang porsi terkecil.";

const WEATHER_LABEL_INSIGHT: &str = "\
Sebagian besar penyewaan terjadi saat cuaca cerah.
Total penyewaan menurun drastis seiring memburuknya cuaca.";

/// One bar or point of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub category: String,
    pub value: Option<f64>,
}

/// A titled, ordered category series with its commentary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ChartPoint>,
    pub insight: &'static str,
}

impl Chart {
    fn from_result<K: Category>(
        title: &'static str,
        x_label: &'static str,
        y_label: &'static str,
        result: &AggregateResult<K>,
        label: impl Fn(K) -> String,
        insight: &'static str,
    ) -> Self {
        let points = result
            .entries()
            .iter()
            .map(|(k, v)| ChartPoint {
                category: label(*k),
                value: *v,
            })
            .collect();

        Chart {
            title,
            x_label,
            y_label,
            points,
            insight,
        }
    }

    /// Largest value in the series, if any point has one.
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().filter_map(|p| p.value).reduce(f64::max)
    }
}

/// Everything the dashboard shows for one date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub range: DateRange,
    pub days: usize,
    pub hours: usize,
    pub total_rentals: u64,
    pub hourly: Chart,
    pub weather: Chart,
    pub time_buckets: Chart,
    pub weather_labels: Chart,
}

impl DashboardReport {
    /// Charts in display order.
    pub fn charts(&self) -> [(&'static str, &Chart); 4] {
        [
            ("hourly", &self.hourly),
            ("weather", &self.weather),
            ("time_buckets", &self.time_buckets),
            ("weather_labels", &self.weather_labels),
        ]
    }
}

/// Filters the dataset to `range` and computes every chart.
#[tracing::instrument(skip(dataset), fields(start = %range.start(), end = %range.end()))]
pub fn build_report(dataset: &Dataset, range: DateRange) -> Result<DashboardReport> {
    let daily = dataset.daily.filter(&range);
    let hourly = dataset.hourly.filter(&range);

    let by_hour_mean = aggregate(&hourly, by_hour, Reducer::Mean)?;
    let by_weather_mean = aggregate(&hourly, by_weather_code, Reducer::Mean)?;
    let by_bucket_total = aggregate(&hourly, by_time_bucket, Reducer::Sum)?;
    let by_label_total = aggregate(&hourly, by_weather_label, Reducer::Sum)?;

    let report = DashboardReport {
        range,
        days: daily.len(),
        hours: hourly.len(),
        total_rentals: daily.total_rentals(),
        hourly: Chart::from_result(
            "Pola Penyewaan Sepeda Berdasarkan Waktu dalam Sehari",
            "Jam dalam Sehari",
            "Rata-rata Penyewaan Sepeda",
            &by_hour_mean,
            |h| h.to_string(),
            HOURLY_INSIGHT,
        ),
        weather: Chart::from_result(
            "Pengaruh Cuaca terhadap Penyewaan Sepeda",
            "Kategori Cuaca",
            "Rata-rata Penyewaan Sepeda",
            &by_weather_mean,
            |c| c.label().to_string(),
            WEATHER_INSIGHT,
        ),
        time_buckets: Chart::from_result(
            "Total Penyewaan Berdasarkan Waktu",
            "Waktu",
            "Total Penyewaan Sepeda",
            &by_bucket_total,
            |b| b.to_string(),
            TIME_BUCKET_INSIGHT,
        ),
        weather_labels: Chart::from_result(
            "Total Penyewaan Berdasarkan Cuaca",
            "Kondisi Cuaca",
            "Total Penyewaan Sepeda",
            &by_label_total,
            |w| w.to_string(),
            WEATHER_LABEL_INSIGHT,
        ),
    };

    info!(
        days = report.days,
        hours = report.hours,
        total_rentals = report.total_rentals,
        "Dashboard report built"
    );
    Ok(report)
}
