//! Sources of raw historical price data

use crate::data::DataLoader;
use crate::error::{ForecastError, Result};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies the raw daily price table for a ticker.
///
/// Implementations return an empty frame, not an error, for tickers they
/// know nothing about; the normalizer turns that into
/// [`ForecastError::EmptySeries`].
pub trait HistoricalSeriesProvider {
    fn history(&self, ticker: &str) -> Result<DataFrame>;
}

impl<F> HistoricalSeriesProvider for F
where
    F: Fn(&str) -> Result<DataFrame>,
{
    fn history(&self, ticker: &str) -> Result<DataFrame> {
        self(ticker)
    }
}

/// Reads `<dir>/<TICKER>.csv` files, one per symbol
#[derive(Debug, Clone)]
pub struct CsvDirectoryProvider {
    dir: PathBuf,
}

impl CsvDirectoryProvider {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidate_paths(&self, ticker: &str) -> Vec<PathBuf> {
        let mut paths = vec![self.dir.join(format!("{}.csv", ticker))];
        let upper = ticker.to_uppercase();
        if upper != ticker {
            paths.push(self.dir.join(format!("{}.csv", upper)));
        }
        paths
    }
}

impl HistoricalSeriesProvider for CsvDirectoryProvider {
    fn history(&self, ticker: &str) -> Result<DataFrame> {
        if ticker.contains(['/', '\\']) || ticker.starts_with('.') {
            return Err(ForecastError::ValidationError(format!(
                "Ticker '{}' contains characters that are not allowed",
                ticker
            )));
        }

        match self.candidate_paths(ticker).into_iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!(ticker, path = %path.display(), "loading price history");
                DataLoader::from_csv(path)
            }
            None => {
                debug!(ticker, dir = %self.dir.display(), "no price history file");
                Ok(DataFrame::empty())
            }
        }
    }
}
