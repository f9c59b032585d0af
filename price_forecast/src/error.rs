//! Error types for the price_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;
use trade_math::MathError;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The provider returned no rows for the ticker (unknown or delisted symbol)
    #[error("No historical data found for ticker '{ticker}'")]
    EmptySeries { ticker: String },

    /// The series is too short for a stable seasonal fit
    #[error("Insufficient data: need at least {required} observations, found {found}")]
    InsufficientData { required: usize, found: usize },

    /// Numerical failure while fitting the regression model
    #[error("Model fit error: {0}")]
    ModelFit(String),

    /// A ratio was requested against a zero base value
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Negative or overly long forecast horizon
    #[error("Invalid horizon: {0} days (must be between 0 and 36525 days)")]
    InvalidHorizon(i64),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error while serializing results
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

// Numeric failures only surface while fitting, so they map onto the fit error.
impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        ForecastError::ModelFit(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Serialization(err.to_string())
    }
}
