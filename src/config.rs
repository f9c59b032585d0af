//! Application settings assembled from the command line and environment

use crate::cli::Cli;
use anyhow::{Context, Result};
use hit_counter::CounterConfig;
use price_forecast::ForecastConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub forecast: ForecastConfig,
    /// `None` keeps the count in memory for this run only
    pub counter: Option<CounterConfig>,
}

impl AppConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            forecast: ForecastConfig::default(),
            counter: None,
        }
    }

    /// Settings for a CLI run; counter settings come from `HIT_COUNTER_*`
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Self::new(&cli.data_dir);
        if let Some(min_history) = cli.min_history {
            config.forecast.min_history_points = min_history;
        }
        config
            .forecast
            .validate()
            .context("invalid forecast settings")?;
        config.counter = CounterConfig::from_env().context("invalid hit counter settings")?;

        Ok(config)
    }
}
