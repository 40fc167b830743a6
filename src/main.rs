//! CLI entry point for the bike rental dashboard.
//!
//! Loads the daily and hourly rental datasets once, restricts them to a date
//! range, and prints the dashboard charts as text or JSON or exports them as CSV.

use anyhow::{Context, Result, bail};
use bike_rental_dashboard::{
    config::DashboardConfig,
    dashboard::build_report,
    loader::{Dataset, load},
    output::{render_json, render_text, write_csv},
    range::DateRange,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_rental_dashboard")]
#[command(about = "Bike sharing rental dashboard over daily and hourly records", long_about = None)]
struct Cli {
    /// Daily data source (file path or URL); overrides DAY_DATA_SOURCE
    #[arg(long, global = true, value_name = "FILE_OR_URL")]
    day: Option<String>,

    /// Hourly data source (file path or URL); overrides HOUR_DATA_SOURCE
    #[arg(long, global = true, value_name = "FILE_OR_URL")]
    hour: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every dashboard chart for a date range
    Report {
        /// First date to include (YYYY-MM-DD); defaults to the earliest date
        #[arg(short, long)]
        start: Option<NaiveDate>,

        /// Last date to include (YYYY-MM-DD); defaults to the latest date
        #[arg(short, long)]
        end: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write every chart series to a CSV file
    Export {
        #[arg(short, long)]
        start: Option<NaiveDate>,

        #[arg(short, long)]
        end: Option<NaiveDate>,

        /// CSV file to write
        #[arg(short, long, default_value = "charts.csv")]
        output: String,
    },
    /// Show the range of dates available in the dataset
    Span,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let config = DashboardConfig::from_env().with_overrides(cli.day, cli.hour);

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_rental_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let dataset = load(&config.sources).context("Failed to load rental dataset")?;

    match cli.command {
        Commands::Report { start, end, format } => {
            let range = resolve_range(&dataset, start, end)?;
            let report = build_report(&dataset, range)?;

            let mut stdout = std::io::stdout().lock();
            match format {
                Format::Text => render_text(&report, &mut stdout)?,
                Format::Json => render_json(&report, &mut stdout)?,
            }
        }
        Commands::Export { start, end, output } => {
            let range = resolve_range(&dataset, start, end)?;
            let report = build_report(&dataset, range)?;

            write_csv(&output, &report).with_context(|| format!("Failed to write {output}"))?;
            info!(output = %output, "Chart series exported");
        }
        Commands::Span => match dataset.date_span() {
            Some((min, max)) => println!("{min} {max}"),
            None => warn!("Dataset has no rows"),
        },
    }

    Ok(())
}

/// Turns optional user-supplied dates into a range inside the dataset's span.
///
/// Missing ends default to the span bounds and supplied dates are clamped to
/// it, the way a date picker bounded by the data would behave.
fn resolve_range(
    dataset: &Dataset,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange> {
    let Some((min, max)) = dataset.date_span() else {
        bail!("dataset has no rows, no date range to select");
    };
    clamp_range((min, max), start, end)
}

fn clamp_range(
    (min, max): (NaiveDate, NaiveDate),
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange> {
    let start = start.unwrap_or(min).clamp(min, max);
    let end = end.unwrap_or(max).clamp(min, max);

    if start != min || end != max {
        info!(start = %start, end = %end, "Using date range");
    }
    Ok(DateRange::new(start, end)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bike_rental_dashboard::DashboardError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span() -> (NaiveDate, NaiveDate) {
        (date(2011, 1, 1), date(2012, 12, 31))
    }

    #[test]
    fn test_defaults_to_full_span() {
        let range = clamp_range(span(), None, None).unwrap();
        assert_eq!(range.start(), span().0);
        assert_eq!(range.end(), span().1);
    }

    #[test]
    fn test_clamps_to_span() {
        let range = clamp_range(span(), Some(date(2010, 5, 1)), Some(date(2013, 1, 1))).unwrap();
        assert_eq!(range.start(), span().0);
        assert_eq!(range.end(), span().1);

        let range = clamp_range(span(), Some(date(2011, 6, 1)), Some(date(2011, 6, 30))).unwrap();
        assert_eq!(range.num_days(), 30);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = clamp_range(span(), Some(date(2012, 3, 1)), Some(date(2012, 2, 1))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::InvalidRange { .. })
        ));
    }
}
