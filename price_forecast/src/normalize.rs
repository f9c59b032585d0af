//! Conversion of raw provider frames into a [`HistoricalSeries`]

use crate::config::{ForecastConfig, DEFAULT_MIN_HISTORY_POINTS};
use crate::data::{HistoricalSeries, PricePoint};
use crate::error::{ForecastError, Result};
use crate::utils::{date_from_epoch_days, date_parser};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Turns whatever the provider returned into the model's input contract:
/// timezone-naive dates, one close per date, ascending order.
#[derive(Debug, Clone)]
pub struct SeriesNormalizer {
    min_points: usize,
}

impl Default for SeriesNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_HISTORY_POINTS)
    }
}

impl SeriesNormalizer {
    pub fn new(min_points: usize) -> Self {
        Self { min_points }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.min_history_points)
    }

    /// Smallest series this normalizer lets through
    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Normalize a raw frame for `ticker`.
    ///
    /// Only the timestamp and close columns are read; everything else is
    /// dropped. Rows with a missing timestamp or close are skipped, and when
    /// two rows fall on the same date the later one wins.
    pub fn normalize(&self, ticker: &str, frame: &DataFrame) -> Result<HistoricalSeries> {
        if frame.height() == 0 {
            return Err(ForecastError::EmptySeries {
                ticker: ticker.to_string(),
            });
        }

        let time_column = detect_time_column(frame)?;
        let close_column = detect_close_column(frame, &time_column)?;

        let dates = column_dates(frame.column(&time_column)?)?;
        let closes = column_values(frame.column(&close_column)?)?;

        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        let mut skipped = 0usize;
        let mut duplicates = 0usize;
        for (date, close) in dates.into_iter().zip(closes) {
            match (date, close) {
                (Some(date), Some(close)) => {
                    if by_date.insert(date, close).is_some() {
                        duplicates += 1;
                    }
                }
                _ => skipped += 1,
            }
        }

        debug!(
            ticker,
            time_column = %time_column,
            close_column = %close_column,
            rows = frame.height(),
            skipped,
            duplicates,
            "normalized provider frame"
        );

        if by_date.is_empty() {
            return Err(ForecastError::EmptySeries {
                ticker: ticker.to_string(),
            });
        }
        if by_date.len() < self.min_points {
            return Err(ForecastError::InsufficientData {
                required: self.min_points,
                found: by_date.len(),
            });
        }

        HistoricalSeries::new(by_date.into_iter().map(PricePoint::from).collect())
    }
}

/// Find the timestamp column by name, falling back to the first temporal column
fn detect_time_column(df: &DataFrame) -> Result<String> {
    let column_names = df.get_column_names();

    for name in &column_names {
        let lower = name.to_lowercase();
        if matches!(lower.as_str(), "date" | "ds" | "datetime" | "timestamp") {
            return Ok(name.to_string());
        }
    }
    for name in &column_names {
        let lower = name.to_lowercase();
        if lower.contains("date") || lower.contains("time") {
            return Ok(name.to_string());
        }
    }
    for column in df.get_columns() {
        if column.dtype().is_temporal() {
            return Ok(column.name().to_string());
        }
    }

    Err(ForecastError::DataError(
        "No time column found in data".to_string(),
    ))
}

/// Find the closing-price column; adjusted closes only when nothing better exists
fn detect_close_column(df: &DataFrame, time_column: &str) -> Result<String> {
    let column_names: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .filter(|name| *name != time_column)
        .collect();

    let lowered: Vec<(String, &str)> = column_names
        .iter()
        .map(|name| (name.to_lowercase(), *name))
        .collect();
    let find = |rule: fn(&str) -> bool| {
        lowered
            .iter()
            .find(|(lower, _)| rule(lower))
            .map(|(_, name)| name.to_string())
    };

    let found = find(|n| n == "close")
        .or_else(|| find(|n| n.contains("close") && !n.contains("adj")))
        .or_else(|| find(|n| n.contains("close")))
        .or_else(|| find(|n| n.contains("price")))
        .or_else(|| find(|n| n == "y"));

    if let Some(name) = found {
        return Ok(name);
    }

    Err(ForecastError::DataError(
        "No close price column found in data".to_string(),
    ))
}

fn column_dates(column: &Series) -> Result<Vec<Option<NaiveDate>>> {
    match column.dtype() {
        DataType::Utf8 => column
            .utf8()?
            .into_iter()
            .map(|value| value.map(date_parser::parse_date).transpose())
            .collect(),
        DataType::Date => {
            let days = column.cast(&DataType::Int32)?;
            let dates = days
                .i32()?
                .into_iter()
                .map(|value| value.and_then(|d| date_from_epoch_days(i64::from(d))))
                .collect();
            Ok(dates)
        }
        DataType::Datetime(unit, _) => {
            let per_day: i64 = match unit {
                TimeUnit::Nanoseconds => 86_400_000_000_000,
                TimeUnit::Microseconds => 86_400_000_000,
                TimeUnit::Milliseconds => 86_400_000,
            };
            let ticks = column.cast(&DataType::Int64)?;
            let dates = ticks
                .i64()?
                .into_iter()
                .map(|value| value.and_then(|t| date_from_epoch_days(t.div_euclid(per_day))))
                .collect();
            Ok(dates)
        }
        other => Err(ForecastError::DataError(format!(
            "Column '{}' has type {} which cannot be read as dates",
            column.name(),
            other
        ))),
    }
}

fn column_values(column: &Series) -> Result<Vec<Option<f64>>> {
    // Text columns appear when a provider spells missing closes as "null"
    if column.dtype() == &DataType::Utf8 {
        return column
            .utf8()?
            .into_iter()
            .map(|value| parse_close(column.name(), value))
            .collect();
    }
    if !column.dtype().is_numeric() {
        return Err(ForecastError::DataError(format!(
            "Column '{}' has type {} which cannot be read as prices",
            column.name(),
            column.dtype()
        )));
    }

    let values = column.cast(&DataType::Float64)?;
    let collected = values.f64()?.into_iter().collect();
    Ok(collected)
}

fn parse_close(column: &str, value: Option<&str>) -> Result<Option<f64>> {
    let text = match value.map(str::trim) {
        None => return Ok(None),
        Some(text) if text.is_empty() || text.eq_ignore_ascii_case("null") => return Ok(None),
        Some(text) => text,
    };
    text.parse().map(Some).map_err(|_| {
        ForecastError::DataError(format!(
            "Column '{}' holds '{}' which is not a price",
            column, text
        ))
    })
}
