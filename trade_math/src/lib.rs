//! # Trade Math
//!
//! Numeric building blocks for additive time series regression.
//! This crate provides the basis expansions (Fourier terms for periodic
//! components, hinge terms for piecewise-linear trends) and a regularized
//! least-squares solver used to fit them.

use thiserror::Error;

pub mod basis;
pub mod regression;

pub use basis::{changepoint_columns, fourier_columns};
pub use regression::{RidgeFit, RidgeRegression};

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
