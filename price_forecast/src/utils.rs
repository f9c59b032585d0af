//! Calendar helpers for the price_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Days, NaiveDate};

/// Day number of 1970-01-01 counted from 0001-01-01 (day 1)
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Every calendar day from `start` to `end`, both inclusive
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// `date + days`, failing when the result leaves the supported calendar
pub fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| {
            ForecastError::ValidationError(format!(
                "{} days after {} is outside the supported calendar",
                days, date
            ))
        })
}

/// Days since the Unix epoch as a float
pub fn days_since_epoch(date: NaiveDate) -> f64 {
    (i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE) as f64
}

/// Inverse of [`days_since_epoch`] for whole days
pub fn date_from_epoch_days(days: i64) -> Option<NaiveDate> {
    let from_ce = i32::try_from(days + UNIX_EPOCH_DAYS_FROM_CE).ok()?;
    NaiveDate::from_num_days_from_ce_opt(from_ce)
}

/// Timestamp parsing for provider data
pub mod date_parser {
    use crate::error::{ForecastError, Result};
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    const OFFSET_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S%z",
    ];

    const NAIVE_DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
    ];

    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

    /// Parse a provider timestamp into a timezone-naive calendar date.
    ///
    /// Offsets are dropped, not applied: the local wall-clock date is kept,
    /// so `2024-01-05T00:00:00+05:30` and `2024-01-05T00:00:00+00:00` both
    /// become `2024-01-05`.
    pub fn parse_date(raw: &str) -> Result<NaiveDate> {
        let s = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.naive_local().date());
        }
        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, format) {
                return Ok(dt.naive_local().date());
            }
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(dt.date());
            }
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(date);
            }
        }

        Err(ForecastError::DataError(format!(
            "Unrecognized timestamp '{}'",
            raw
        )))
    }
}
