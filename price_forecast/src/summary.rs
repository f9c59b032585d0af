//! Headline numbers derived from a forecast

use crate::data::HistoricalSeries;
use crate::error::{ForecastError, Result};
use crate::models::ForecastResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Current price, price at the horizon, and the change between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// Last observed close, not the fitted value for that day
    pub current_price: f64,
    /// Predicted value on the last forecast day
    pub horizon_price: f64,
    /// Percentage change from current to horizon price; `None` when the
    /// current price is zero
    pub pct_change: Option<f64>,
    /// Date of the last forecast point
    pub horizon_date: NaiveDate,
    /// Days between the last observation and `horizon_date`
    pub horizon_days: i64,
}

/// `(target - base) / base * 100`
pub fn percentage_change(base: f64, target: f64) -> Result<f64> {
    if base == 0.0 {
        return Err(ForecastError::DivisionByZero(
            "percentage change against a zero current price".to_string(),
        ));
    }
    Ok((target - base) / base * 100.0)
}

impl ForecastSummary {
    /// Summarize a forecast against the series it was fitted on
    pub fn from_forecast(series: &HistoricalSeries, forecast: &ForecastResult) -> Result<Self> {
        let last_point = forecast.last().ok_or_else(|| {
            ForecastError::DataError("Cannot summarize an empty forecast".to_string())
        })?;
        let current = series.last();

        let pct_change = match percentage_change(current.price, last_point.predicted) {
            Ok(change) => Some(change),
            Err(err) => {
                warn!(date = %current.date, "{}", err);
                None
            }
        };

        Ok(Self {
            current_price: current.price,
            horizon_price: last_point.predicted,
            pct_change,
            horizon_date: last_point.date,
            horizon_days: (last_point.date - current.date).num_days(),
        })
    }
}

impl std::fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Current Price: {:.2}", self.current_price)?;
        writeln!(
            f,
            "Expected Price after {} days: {:.2}",
            self.horizon_days, self.horizon_price
        )?;
        match self.pct_change {
            Some(change) => writeln!(f, "Percentage Appreciation expected: {:.2}%", change)?,
            None => writeln!(f, "Percentage Appreciation expected: n/a")?,
        }
        writeln!(f, "Date of Forecasted Price: {}", self.horizon_date)?;
        Ok(())
    }
}
