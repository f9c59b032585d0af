//! Historical price data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One daily closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Calendar date, no time of day and no timezone
    pub date: NaiveDate,
    /// Closing price
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

impl From<(NaiveDate, f64)> for PricePoint {
    fn from((date, price): (NaiveDate, f64)) -> Self {
        Self { date, price }
    }
}

/// Normalized daily closing prices in strictly increasing date order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    points: Vec<PricePoint>,
}

impl HistoricalSeries {
    /// Create a series, checking that dates are strictly increasing
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(ForecastError::DataError(
                "A historical series needs at least one observation".to_string(),
            ));
        }

        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(ForecastError::DataError(format!(
                "Dates must be strictly increasing: {} is followed by {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { points })
    }

    /// Create a series from parallel date and price vectors
    pub fn from_parts(dates: Vec<NaiveDate>, prices: Vec<f64>) -> Result<Self> {
        if dates.len() != prices.len() {
            return Err(ForecastError::ValidationError(format!(
                "Dates length ({}) doesn't match prices length ({})",
                dates.len(),
                prices.len()
            )));
        }

        Self::new(dates.into_iter().zip(prices).map(PricePoint::from).collect())
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest observation
    pub fn first(&self) -> &PricePoint {
        // Non-empty by construction
        &self.points[0]
    }

    /// Most recent observation
    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Calendar days between the first and last observation
    pub fn span_days(&self) -> i64 {
        (self.last().date - self.first().date).num_days()
    }
}

/// Number of future calendar days to project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ForecastHorizon(u32);

impl ForecastHorizon {
    /// Longest accepted horizon, about one hundred years of calendar days
    pub const MAX_DAYS: u32 = 36_525;

    /// Validate a caller-supplied day count.
    ///
    /// Zero is accepted and yields a forecast of the historical span only.
    pub fn new(days: i64) -> Result<Self> {
        match u32::try_from(days) {
            Ok(days) if days <= Self::MAX_DAYS => Ok(Self(days)),
            _ => Err(ForecastError::InvalidHorizon(days)),
        }
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for ForecastHorizon {
    type Error = ForecastError;

    fn try_from(days: i64) -> Result<Self> {
        Self::new(days)
    }
}

impl std::fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.0)
    }
}

/// Data loader for raw provider frames
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a raw price table from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .with_null_values(Some(NullValues::AllColumnsSingle("null".to_string())))
            .finish()?;

        Ok(df)
    }

    /// Build a raw two-column frame (`Date` as text, `Close`) from price points
    pub fn frame_from_points(points: &[PricePoint]) -> Result<DataFrame> {
        let dates: Vec<String> = points.iter().map(|p| p.date.to_string()).collect();
        let closes: Vec<f64> = points.iter().map(|p| p.price).collect();

        let df = DataFrame::new(vec![
            Series::new("Date", dates),
            Series::new("Close", closes),
        ])?;

        Ok(df)
    }

    /// Write a frame as CSV with a header row
    pub fn to_csv<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).has_header(true).finish(df)?;
        Ok(())
    }
}
