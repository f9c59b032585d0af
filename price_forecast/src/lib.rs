//! # Price Forecast
//!
//! Forecasts daily closing prices with an additive regression model: a
//! piecewise-linear trend plus named seasonal components.
//!
//! ## Features
//!
//! - Normalization of raw provider tables into clean daily series
//! - Additive trend + seasonality model with `monthly` (30.5 days, order 5)
//!   and `weekly` (7 days, order 3) components, plus yearly for long histories
//! - Forecasts covering the whole history and any number of future days
//! - Summary of current price, horizon price and expected appreciation
//!
//! ## Quick Start
//!
//! ```no_run
//! use price_forecast::{CsvDirectoryProvider, ForecastConfig, ForecastPipeline};
//!
//! let pipeline = ForecastPipeline::new(
//!     CsvDirectoryProvider::new("data"),
//!     ForecastConfig::default(),
//! )?;
//!
//! let report = pipeline.run("INFY.NS", 90)?;
//! println!("{}", report.summary);
//! # Ok::<(), price_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod summary;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, YearlySeasonality};
pub use crate::data::{DataLoader, ForecastHorizon, HistoricalSeries, PricePoint};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{
    AdditiveModel, FitMetadata, ForecastModel, ForecastPoint, ForecastResult, SeasonalComponent,
    TrainedForecastModel,
};
pub use crate::normalize::SeriesNormalizer;
pub use crate::pipeline::{ForecastPipeline, ForecastReport, RequestError};
pub use crate::provider::{CsvDirectoryProvider, HistoricalSeriesProvider};
pub use crate::summary::{percentage_change, ForecastSummary};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
