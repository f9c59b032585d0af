//! Request-level composition: fetch, normalize, fit, summarize

use crate::config::ForecastConfig;
use crate::data::{ForecastHorizon, HistoricalSeries};
use crate::error::{ForecastError, Result};
use crate::models::{AdditiveModel, ForecastModel, ForecastResult};
use crate::normalize::SeriesNormalizer;
use crate::provider::HistoricalSeriesProvider;
use crate::summary::ForecastSummary;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Everything produced for one forecast request
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub ticker: String,
    pub horizon: ForecastHorizon,
    pub series: HistoricalSeries,
    pub forecast: ForecastResult,
    pub summary: ForecastSummary,
}

/// A failed request, worded for the person who made it
#[derive(Debug, Error)]
#[error("Error processing {ticker}: {source}")]
pub struct RequestError {
    pub ticker: String,
    #[source]
    pub source: ForecastError,
}

/// Stateless forecast pipeline over a historical data provider.
///
/// Every call re-fetches and re-fits; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct ForecastPipeline<P> {
    provider: P,
    normalizer: SeriesNormalizer,
    model: AdditiveModel,
}

impl<P: HistoricalSeriesProvider> ForecastPipeline<P> {
    pub fn new(provider: P, config: ForecastConfig) -> Result<Self> {
        let normalizer = SeriesNormalizer::from_config(&config);
        let model = AdditiveModel::new(config)?;

        Ok(Self {
            provider,
            normalizer,
            model,
        })
    }

    /// Use a custom model, for example one with extra seasonal components
    pub fn with_model(mut self, model: AdditiveModel) -> Self {
        self.normalizer = SeriesNormalizer::from_config(model.config());
        self.model = model;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn model(&self) -> &AdditiveModel {
        &self.model
    }

    /// Run the whole pipeline for `ticker` over `horizon_days` future days
    pub fn run(&self, ticker: &str, horizon_days: i64) -> Result<ForecastReport> {
        let horizon = ForecastHorizon::new(horizon_days)?;
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(ForecastError::ValidationError(
                "Ticker symbol must not be empty".to_string(),
            ));
        }

        info!(ticker, horizon = horizon.days(), "forecast requested");

        let raw = self.provider.history(ticker)?;
        let series = self.normalizer.normalize(ticker, &raw)?;
        let forecast = self.model.fit_and_predict(&series, horizon)?;
        let summary = ForecastSummary::from_forecast(&series, &forecast)?;

        info!(
            ticker,
            observations = series.len(),
            points = forecast.len(),
            current_price = summary.current_price,
            horizon_price = summary.horizon_price,
            "forecast complete"
        );

        Ok(ForecastReport {
            ticker: ticker.to_string(),
            horizon,
            series,
            forecast,
            summary,
        })
    }

    /// Like [`run`](Self::run), with the failure folded into a [`RequestError`]
    pub fn run_request(
        &self,
        ticker: &str,
        horizon_days: i64,
    ) -> std::result::Result<ForecastReport, RequestError> {
        self.run(ticker, horizon_days).map_err(|source| {
            warn!(ticker, error = %source, "forecast failed");
            RequestError {
                ticker: ticker.to_string(),
                source,
            }
        })
    }
}
