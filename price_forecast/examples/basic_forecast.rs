use chrono::{Datelike, Duration, NaiveDate, Weekday};
use price_forecast::{
    AdditiveModel, ForecastConfig, ForecastHorizon, ForecastModel, ForecastSummary,
    HistoricalSeries, SeasonalComponent, TrainedForecastModel,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Price Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    println!("Creating sample data...");
    let data = create_sample_daily_data()?;
    println!(
        "Sample data created: {} trading days from {} to {}\n",
        data.len(),
        data.first().date,
        data.last().date
    );

    // Default model: monthly and weekly components
    let model = AdditiveModel::new(ForecastConfig::default())?;
    let trained = model.train(&data)?;
    println!(
        "Trained {} with {} changepoints",
        trained.name(),
        trained.changepoint_dates().len()
    );

    for days in [30, 90, 180] {
        let forecast = trained.forecast(ForecastHorizon::new(days)?)?;
        let summary = ForecastSummary::from_forecast(&data, &forecast)?;
        println!("\nHorizon: {} days", days);
        print!("{}", summary);
    }

    // Add a quarterly cycle on top of the registered components
    let quarterly = AdditiveModel::new(ForecastConfig::default())?
        .with_seasonality(SeasonalComponent::new("quarterly", 91.25, 2))?;
    let forecast = quarterly.fit_and_predict(&data, ForecastHorizon::new(60)?)?;

    println!("\nWith a quarterly component:");
    print!("{}", forecast.metadata().accuracy);
    println!("\nLast five forecast days:");
    for point in forecast.out_of_sample().iter().rev().take(5).rev() {
        println!(
            "  {}  {:>8.2}  [{:>8.2}, {:>8.2}]",
            point.date, point.predicted, point.lower, point.upper
        );
    }

    Ok(())
}

/// One year of weekday closes with a trend and a weekly pattern
fn create_sample_daily_data() -> price_forecast::Result<HistoricalSeries> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).expect("valid date");
    let mut dates = Vec::new();
    let mut prices = Vec::new();

    for i in 0..365 {
        let date = start + Duration::days(i);
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        let t = i as f64;
        let weekly = 1.5 * (2.0 * std::f64::consts::PI * t / 7.0).sin();
        let drift = 0.08 * t + 3.0 * (t / 40.0).sin();
        dates.push(date);
        prices.push(120.0 + drift + weekly);
    }

    HistoricalSeries::from_parts(dates, prices)
}
