//! Output formatting for dashboard reports.
//!
//! Supports terminal bar charts, JSON serialization, and CSV export.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::dashboard::{Chart, DashboardReport};

const BAR_WIDTH: usize = 40;

/// Writes the report as labeled horizontal bar charts with commentary.
pub fn render_text(report: &DashboardReport, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Bike Sharing Dashboard")?;
    writeln!(
        out,
        "Rentang waktu: {} s/d {} ({} hari, {} catatan per jam, total {} penyewaan)",
        report.range.start(),
        report.range.end(),
        report.days,
        report.hours,
        report.total_rentals
    )?;

    for (_, chart) in report.charts() {
        writeln!(out)?;
        render_chart(chart, out)?;
    }

    Ok(())
}

fn render_chart(chart: &Chart, out: &mut impl Write) -> Result<()> {
    writeln!(out, "== {} ==", chart.title)?;
    writeln!(out, "{} / {}", chart.x_label, chart.y_label)?;

    let label_width = chart
        .points
        .iter()
        .map(|p| p.category.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart.max_value().unwrap_or(0.0);

    for point in &chart.points {
        match point.value {
            Some(v) => writeln!(
                out,
                "{:>width$} | {:<bar$} {:.2}",
                point.category,
                "#".repeat(bar_len(v, max)),
                v,
                width = label_width,
                bar = BAR_WIDTH
            )?,
            None => writeln!(
                out,
                "{:>width$} | {:<bar$} -",
                point.category,
                "",
                width = label_width,
                bar = BAR_WIDTH
            )?,
        }
    }

    writeln!(out, "Insight:")?;
    for line in chart.insight.lines() {
        writeln!(out, "  - {line}")?;
    }
    Ok(())
}

fn bar_len(value: f64, max: f64) -> usize {
    if max <= 0.0 {
        0
    } else {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    }
}

/// Writes the report as pretty-printed JSON. Empty categories become `null`.
pub fn render_json(report: &DashboardReport, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct SeriesRow<'a> {
    chart: &'a str,
    category: &'a str,
    value: Option<f64>,
}

/// Writes every chart point as a `chart,category,value` row to a new CSV file.
pub fn write_csv(path: &str, report: &DashboardReport) -> Result<()> {
    debug!(path, "Writing chart series CSV");
    let mut writer = csv::Writer::from_path(path)?;

    for (name, chart) in report.charts() {
        for point in &chart.points {
            writer.serialize(SeriesRow {
                chart: name,
                category: &point.category,
                value: point.value,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_report;
    use crate::loader::Dataset;
    use crate::range::DateRange;
    use crate::table::{DailyRecord, DailyTable, HourlyRecord, HourlyTable};
    use chrono::NaiveDate;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn report() -> DashboardReport {
        let date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let dataset = Dataset {
            daily: DailyTable::new(vec![DailyRecord { date, rental_count: 60 }]),
            hourly: HourlyTable::new(vec![
                HourlyRecord { date, hour: 7, weather_code: 1, rental_count: 40 },
                HourlyRecord { date, hour: 8, weather_code: 2, rental_count: 20 },
            ]),
        };
        build_report(&dataset, DateRange::new(date, date).unwrap()).unwrap()
    }

    #[test]
    fn test_bar_len_scaling() {
        assert_eq!(bar_len(10.0, 0.0), 0);
        assert_eq!(bar_len(20.0, 40.0), BAR_WIDTH / 2);
        assert_eq!(bar_len(40.0, 40.0), BAR_WIDTH);
    }

    #[test]
    fn test_render_text_lists_every_chart() {
        let mut buf = Vec::new();
        render_text(&report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("2011-01-01 s/d 2011-01-01"));
        assert!(text.contains("total 60 penyewaan"));
        assert_eq!(text.matches("== ").count(), 4);
        assert!(text.contains(&format!(" 7 | {} 40.00", "#".repeat(BAR_WIDTH))));
        assert!(text.contains("Hujan Deras |"));
        assert!(text.contains("Insight:"));
    }

    #[test]
    fn test_render_json_uses_null_for_empty_groups() {
        let mut buf = Vec::new();
        render_json(&report(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["range"]["start"], "2011-01-01");
        assert_eq!(value["hourly"]["points"][7]["value"], 40.0);
        assert!(value["hourly"]["points"][0]["value"].is_null());
        assert_eq!(value["weather"]["points"][1]["category"], "Mendung");
    }

    #[test]
    fn test_write_csv_one_row_per_point() {
        let path = temp_path("bike_dashboard_test_series.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &report()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // header + 24 hours + 4 weather codes + 5 buckets + 4 labels
        assert_eq!(lines.len(), 1 + 24 + 4 + 5 + 4);
        assert_eq!(lines[0], "chart,category,value");
        assert!(lines.contains(&"hourly,7,40.0"));
        assert!(lines.contains(&"hourly,0,"));
        assert!(lines.contains(&"time_buckets,Pagi Hari,60.0"));

        fs::remove_file(&path).unwrap();
    }
}
