//! Forecasting models for daily price series

use crate::data::{ForecastHorizon, HistoricalSeries};
use crate::error::{ForecastError, Result};
use crate::metrics::FitAccuracy;
use chrono::NaiveDate;
use polars::prelude::{DataFrame, NamedFrom, Series};
use serde::Serialize;
use std::fmt::Debug;

pub mod additive;
pub mod seasonality;

pub use additive::{AdditiveModel, TrainedAdditiveModel};
pub use seasonality::SeasonalComponent;

/// Prediction for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    /// Lower edge of the uncertainty band
    pub lower: f64,
    /// Upper edge of the uncertainty band
    pub upper: f64,
}

/// Diagnostics describing a fitted model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitMetadata {
    pub model: String,
    pub observations: usize,
    pub history_start: NaiveDate,
    pub history_end: NaiveDate,
    /// Dates at which the trend is allowed to change slope
    pub changepoints: Vec<NaiveDate>,
    /// Seasonal components that were active in the fit
    pub seasonalities: Vec<SeasonalComponent>,
    /// Prices were divided by this before fitting
    pub value_scale: f64,
    /// Standard deviation of the in-sample residuals, in price units
    pub residual_std: f64,
    pub interval_width: f64,
    pub accuracy: FitAccuracy,
}

/// Forecast over the fitted history and the requested future days
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>,
    history_end: NaiveDate,
    metadata: FitMetadata,
}

impl ForecastResult {
    /// Create a forecast result; dates must be strictly increasing
    pub fn new(
        points: Vec<ForecastPoint>,
        history_end: NaiveDate,
        metadata: FitMetadata,
    ) -> Result<Self> {
        if points.is_empty() {
            return Err(ForecastError::ValidationError(
                "A forecast needs at least one point".to_string(),
            ));
        }
        if points.windows(2).any(|w| w[1].date <= w[0].date) {
            return Err(ForecastError::ValidationError(
                "Forecast dates must be strictly increasing".to_string(),
            ));
        }

        Ok(Self {
            points,
            history_end,
            metadata,
        })
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&ForecastPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }

    /// Last date covered by the historical input
    pub fn history_end(&self) -> NaiveDate {
        self.history_end
    }

    pub fn metadata(&self) -> &FitMetadata {
        &self.metadata
    }

    /// Points falling inside the historical date range
    pub fn in_sample(&self) -> &[ForecastPoint] {
        &self.points[..self.split_index()]
    }

    /// Points beyond the last historical date
    pub fn out_of_sample(&self) -> &[ForecastPoint] {
        &self.points[self.split_index()..]
    }

    /// Predicted values in date order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted).collect()
    }

    /// `(date, predicted)` pairs ready for plotting
    pub fn curve(&self) -> Vec<(NaiveDate, f64)> {
        self.points.iter().map(|p| (p.date, p.predicted)).collect()
    }

    /// Tabular view: `Date` as text, then `Predicted`, `Lower` and `Upper`
    pub fn to_frame(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self.points.iter().map(|p| p.date.to_string()).collect();
        let column = |f: fn(&ForecastPoint) -> f64| -> Vec<f64> { self.points.iter().map(f).collect() };

        let df = DataFrame::new(vec![
            Series::new("Date", dates),
            Series::new("Predicted", column(|p| p.predicted)),
            Series::new("Lower", column(|p| p.lower)),
            Series::new("Upper", column(|p| p.upper)),
        ])?;

        Ok(df)
    }

    /// Serialize the points and diagnostics as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn split_index(&self) -> usize {
        self.points.partition_point(|p| p.date <= self.history_end)
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Predict every day of the history plus `horizon` future days
    fn forecast(&self, horizon: ForecastHorizon) -> Result<ForecastResult>;

    /// Fitted values at the observed dates of `data`
    fn predict(&self, data: &HistoricalSeries) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a historical series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Fit the model in one batch over the whole series
    fn train(&self, data: &HistoricalSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;

    /// Fit, then forecast the history and `horizon` future days
    fn fit_and_predict(
        &self,
        data: &HistoricalSeries,
        horizon: ForecastHorizon,
    ) -> Result<ForecastResult> {
        self.train(data)?.forecast(horizon)
    }
}
