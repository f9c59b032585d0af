use assert_approx_eq::assert_approx_eq;
use chrono::{Duration, NaiveDate};
use price_forecast::{
    AdditiveModel, ForecastConfig, ForecastError, ForecastHorizon, ForecastModel,
    HistoricalSeries, SeasonalComponent, TrainedForecastModel, YearlySeasonality,
};
use rstest::rstest;
use std::f64::consts::PI;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

/// Daily prices with a gentle trend, weekly and monthly swings and some wiggle
fn create_test_data(days: i64) -> HistoricalSeries {
    let dates: Vec<NaiveDate> = (0..days).map(|i| start() + Duration::days(i)).collect();
    let values: Vec<f64> = (0..days)
        .map(|i| {
            let t = i as f64;
            100.0
                + 0.05 * t
                + 2.0 * (2.0 * PI * t / 7.0).sin()
                + 3.0 * (2.0 * PI * t / 30.5).cos()
                + 0.5 * (1.7 * t).sin()
        })
        .collect();

    HistoricalSeries::from_parts(dates, values).unwrap()
}

/// Weekday-only closes, the way exchanges report them
fn create_trading_day_data(weeks: i64) -> HistoricalSeries {
    let dates: Vec<NaiveDate> = (0..weeks * 7)
        .map(|i| start() + Duration::days(i))
        .filter(|d| chrono::Datelike::weekday(d).number_from_monday() <= 5)
        .collect();
    let values: Vec<f64> = (0..dates.len()).map(|i| 50.0 + 0.1 * i as f64).collect();

    HistoricalSeries::from_parts(dates, values).unwrap()
}

fn model() -> AdditiveModel {
    AdditiveModel::new(ForecastConfig::default()).unwrap()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(30)]
#[case(365)]
fn test_forecast_covers_history_and_horizon_without_gaps(#[case] horizon: i64) {
    let data = create_trading_day_data(16);
    let forecast = model()
        .fit_and_predict(&data, ForecastHorizon::new(horizon).unwrap())
        .unwrap();

    let first = forecast.first().unwrap().date;
    let last = forecast.last().unwrap().date;
    assert_eq!(first, data.first().date);
    assert_eq!(last, data.last().date + Duration::days(horizon));
    assert_eq!(forecast.len() as i64, data.span_days() + 1 + horizon);
    assert!(forecast
        .points()
        .windows(2)
        .all(|w| w[1].date - w[0].date == Duration::days(1)));

    assert_eq!(forecast.out_of_sample().len() as i64, horizon);
    assert_eq!(
        forecast.in_sample().len() + forecast.out_of_sample().len(),
        forecast.len()
    );
}

#[test]
fn test_zero_horizon_returns_only_the_historical_span() {
    let data = create_test_data(90);
    let forecast = model()
        .fit_and_predict(&data, ForecastHorizon::new(0).unwrap())
        .unwrap();

    assert_eq!(forecast.len(), 90);
    assert!(forecast.out_of_sample().is_empty());
    assert_eq!(forecast.last().unwrap().date, data.last().date);
}

#[test]
fn test_linear_trend_is_extrapolated() {
    let dates: Vec<NaiveDate> = (0..120).map(|i| start() + Duration::days(i)).collect();
    let values: Vec<f64> = (0..120).map(|i| 50.0 + 0.5 * i as f64).collect();
    let data = HistoricalSeries::from_parts(dates, values).unwrap();

    let forecast = model()
        .fit_and_predict(&data, ForecastHorizon::new(30).unwrap())
        .unwrap();

    // 50 + 0.5 * (119 + 30)
    let expected = 124.5;
    let predicted = forecast.last().unwrap().predicted;
    assert!(
        (predicted - expected).abs() < 2.0,
        "predicted {} expected about {}",
        predicted,
        expected
    );
}

#[test]
fn test_fit_tracks_seasonal_history() {
    let data = create_test_data(180);
    let trained = model().train(&data).unwrap();

    let fitted = trained.predict(&data).unwrap();
    assert_eq!(fitted.len(), data.len());

    let forecast = trained.forecast(ForecastHorizon::new(30).unwrap()).unwrap();
    let metadata = forecast.metadata();
    assert_eq!(metadata.observations, 180);
    assert!(metadata.accuracy.mape < 2.0, "mape {}", metadata.accuracy.mape);
    assert!(metadata.residual_std > 0.0);
    assert_eq!(metadata.changepoints.len(), 25);
}

#[test]
fn test_uncertainty_band_contains_prediction_and_widens() {
    let data = create_test_data(120);
    let forecast = model()
        .fit_and_predict(&data, ForecastHorizon::new(60).unwrap())
        .unwrap();

    for point in forecast.points() {
        assert!(point.lower <= point.predicted && point.predicted <= point.upper);
    }

    let in_sample_width = {
        let p = forecast.in_sample().last().unwrap();
        p.upper - p.lower
    };
    let horizon_width = {
        let p = forecast.last().unwrap();
        p.upper - p.lower
    };
    assert!(horizon_width > in_sample_width);
}

#[test]
fn test_registered_seasonalities() {
    let model = model();
    let names: Vec<&str> = model.seasonalities().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["monthly", "weekly"]);

    let monthly = &model.seasonalities()[0];
    assert_approx_eq!(monthly.period_days, 30.5);
    assert_eq!(monthly.harmonic_order, 5);

    let weekly = &model.seasonalities()[1];
    assert_approx_eq!(weekly.period_days, 7.0);
    assert_eq!(weekly.harmonic_order, 3);
}

#[test]
fn test_yearly_component_for_long_histories() {
    let long = create_test_data(800);
    let trained = model().train(&long).unwrap();
    let names: Vec<&str> = trained.seasonalities().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["monthly", "weekly", "yearly"]);

    let config = ForecastConfig {
        yearly_seasonality: YearlySeasonality::Disabled,
        ..ForecastConfig::default()
    };
    let trained = AdditiveModel::new(config).unwrap().train(&long).unwrap();
    assert_eq!(trained.seasonalities().len(), 2);
}

#[test]
fn test_custom_seasonality_replaces_same_name() {
    let model = model()
        .with_seasonality(SeasonalComponent::new("weekly", 7.0, 5))
        .unwrap()
        .with_seasonality(SeasonalComponent::new("quarterly", 91.25, 2))
        .unwrap();

    assert_eq!(model.seasonalities().len(), 3);
    assert_eq!(model.seasonalities()[1].name, "weekly");
    assert_eq!(model.seasonalities()[1].harmonic_order, 5);

    assert!(model
        .clone()
        .with_seasonality(SeasonalComponent::new("bad", 0.0, 2))
        .is_err());
    assert!(model
        .with_seasonality(SeasonalComponent::new("bad", 7.0, 0))
        .is_err());
}

#[test]
fn test_fit_is_deterministic() {
    let data = create_test_data(150);
    let horizon = ForecastHorizon::new(90).unwrap();

    let first = model().fit_and_predict(&data, horizon).unwrap();
    let second = model().fit_and_predict(&data, horizon).unwrap();

    assert_eq!(first, second);
}

#[rstest]
#[case(0.0)]
#[case(-3.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn test_invalid_prices_fail_the_fit(#[case] bad: f64) {
    let dates: Vec<NaiveDate> = (0..10).map(|i| start() + Duration::days(i)).collect();
    let mut values = vec![10.0; 10];
    values[4] = bad;
    let data = HistoricalSeries::from_parts(dates, values).unwrap();

    let result = model().train(&data);
    assert!(matches!(result, Err(ForecastError::ModelFit(_))));
}

#[test]
fn test_single_date_fails_the_fit() {
    let data = HistoricalSeries::from_parts(vec![start()], vec![10.0]).unwrap();
    let result = model().train(&data);
    assert!(matches!(result, Err(ForecastError::ModelFit(_))));
}

#[test]
fn test_forecast_result_serializes() {
    let data = create_test_data(70);
    let forecast = model()
        .fit_and_predict(&data, ForecastHorizon::new(5).unwrap())
        .unwrap();

    let json = forecast.to_json().unwrap();
    assert!(json.contains("\"history_end\""));
    assert!(json.contains("\"monthly\""));

    let curve = forecast.curve();
    assert_eq!(curve.len(), forecast.len());
    assert_eq!(curve[0].0, data.first().date);
}

#[test]
fn test_forecast_frame_and_csv_export() {
    let data = create_test_data(65);
    let forecast = model()
        .fit_and_predict(&data, ForecastHorizon::new(10).unwrap())
        .unwrap();

    let mut df = forecast.to_frame().unwrap();
    assert_eq!(df.height(), 75);
    assert_eq!(
        df.get_column_names(),
        vec!["Date", "Predicted", "Lower", "Upper"]
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("curve.csv");
    price_forecast::DataLoader::to_csv(&mut df, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("Date,Predicted,Lower,Upper"));
    assert!(lines.next().unwrap().starts_with("2023-01-02,"));
    assert_eq!(written.lines().count(), 76);
}
