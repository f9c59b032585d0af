use polars::prelude::*;
use price_forecast::{ForecastError, ForecastHorizon, HistoricalSeries};
use std::io;
use trade_math::MathError;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    assert!(matches!(
        ForecastError::from(io_error),
        ForecastError::IoError(_)
    ));

    let math_error = MathError::CalculationError("matrix is singular".to_string());
    match ForecastError::from(math_error) {
        ForecastError::ModelFit(msg) => assert!(msg.contains("matrix is singular")),
        other => panic!("Expected ModelFit, got {:?}", other),
    }

    let polars_error = PolarsError::ColumnNotFound("Close".into());
    assert!(matches!(
        ForecastError::from(polars_error),
        ForecastError::PolarsError(_)
    ));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        ForecastError::from(json_error),
        ForecastError::Serialization(_)
    ));
}

#[test]
fn test_error_display() {
    let error = ForecastError::EmptySeries {
        ticker: "NOPE".to_string(),
    };
    assert_eq!(error.to_string(), "No historical data found for ticker 'NOPE'");

    let error = ForecastError::InsufficientData {
        required: 61,
        found: 12,
    };
    assert_eq!(
        error.to_string(),
        "Insufficient data: need at least 61 observations, found 12"
    );

    let error = ForecastError::InvalidHorizon(-30);
    assert!(error.to_string().contains("-30 days"));
}

#[test]
fn test_validation_errors() {
    assert!(matches!(
        ForecastHorizon::new(-1),
        Err(ForecastError::InvalidHorizon(-1))
    ));
    assert!(matches!(
        ForecastHorizon::new(36_526),
        Err(ForecastError::InvalidHorizon(36_526))
    ));
    assert!(matches!(
        ForecastHorizon::new(i64::MAX),
        Err(ForecastError::InvalidHorizon(_))
    ));

    let d = |day| chrono::NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    let unsorted = HistoricalSeries::from_parts(vec![d(2), d(1)], vec![1.0, 2.0]);
    assert!(matches!(unsorted, Err(ForecastError::DataError(_))));

    let mismatched = HistoricalSeries::from_parts(vec![d(1)], vec![1.0, 2.0]);
    assert!(matches!(mismatched, Err(ForecastError::ValidationError(_))));
}
