use chrono::{Duration, NaiveDate};
use clap::Parser;
use pretty_assertions::assert_eq;
use price_forecast::{ForecastConfig, ForecastError};
use std::fs;
use std::path::Path;
use stock_forecast::cli::Cli;
use stock_forecast::output::write_report;
use stock_forecast::{
    build_app, AppConfig, CsvDirectoryProvider, ForecastApp, ForecastPipeline, HitCounter,
    MemoryStore,
};

fn write_history(dir: &Path, ticker: &str, days: i64) {
    let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let mut csv = String::from("Date,Close,Volume\n");
    for i in 0..days {
        let t = i as f64;
        let close = 75.0 + 0.1 * t + (t / 3.0).sin();
        csv.push_str(&format!("{},{:.4},500\n", start + Duration::days(i), close));
    }
    fs::write(dir.join(format!("{}.csv", ticker)), csv).unwrap();
}

fn app<'a>(
    dir: &Path,
    store: &'a MemoryStore,
) -> ForecastApp<CsvDirectoryProvider, &'a MemoryStore> {
    let pipeline =
        ForecastPipeline::new(CsvDirectoryProvider::new(dir), ForecastConfig::default()).unwrap();
    ForecastApp::new(pipeline, HitCounter::new(store))
}

#[test]
fn test_handle_counts_every_request() {
    let dir = tempfile::tempdir().unwrap();
    write_history(dir.path(), "ACME", 90);
    let store = MemoryStore::with_value(41);
    let app = app(dir.path(), &store);

    let first = app.handle("ACME", 30);
    let report = first.outcome.unwrap();
    assert_eq!(first.hit_count, 42);
    assert_eq!(report.forecast.len(), 120);

    // Failures still count as visits
    let second = app.handle("MISSING", 30);
    assert_eq!(second.hit_count, 43);
    let err = second.outcome.unwrap_err();
    assert!(matches!(err.source, ForecastError::EmptySeries { .. }));
    assert_eq!(
        err.to_string(),
        "Error processing MISSING: No historical data found for ticker 'MISSING'"
    );

    assert_eq!(store.value(), 43);
}

#[test]
fn test_negative_horizon_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_history(dir.path(), "ACME", 90);
    let store = MemoryStore::new();

    let response = app(dir.path(), &store).handle("ACME", -30);
    assert_eq!(response.hit_count, 1);
    assert!(matches!(
        response.outcome.unwrap_err().source,
        ForecastError::InvalidHorizon(-30)
    ));
}

#[test]
fn test_default_app_counts_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    write_history(dir.path(), "ACME", 70);

    let app = build_app(&AppConfig::new(dir.path())).unwrap();
    assert_eq!(app.handle("ACME", 0).hit_count, 1);
    assert_eq!(app.handle("ACME", 0).hit_count, 2);
    assert_eq!(app.counter().current(), 2);
}

#[test]
fn test_write_report_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    write_history(dir.path(), "ACME", 80);
    let store = MemoryStore::new();
    let report = app(dir.path(), &store)
        .handle("ACME", 5)
        .outcome
        .unwrap();

    let csv_path = dir.path().join("curve.csv");
    write_report(&report, &csv_path).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Date,Predicted,Lower,Upper\n2023-06-01,"));
    assert_eq!(csv.lines().count(), 86);

    let json_path = dir.path().join("report.JSON");
    write_report(&report, &json_path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["ticker"], "ACME");
    assert_eq!(value["summary"]["horizon_days"], 5);
}

#[test]
fn test_cli_arguments() {
    let cli = Cli::try_parse_from([
        "stock_forecast",
        "--ticker",
        "INFY.NS",
        "--days",
        "-5",
        "--data-dir",
        "/tmp/prices",
        "--min-history",
        "30",
        "--json",
    ])
    .unwrap();

    assert_eq!(cli.ticker, "INFY.NS");
    assert_eq!(cli.days, -5);
    assert_eq!(cli.min_history, Some(30));
    assert!(cli.json);
    assert!(cli.output.is_none());

    let config = AppConfig::from_cli(&cli).unwrap();
    assert_eq!(config.data_dir, Path::new("/tmp/prices"));
    assert_eq!(config.forecast.min_history_points, 30);
}

#[test]
fn test_cli_rejects_unusable_min_history() {
    let cli = Cli::try_parse_from(["stock_forecast", "-t", "ACME", "--min-history", "1"]).unwrap();
    assert_eq!(cli.days, 30);
    assert!(AppConfig::from_cli(&cli).is_err());
}
