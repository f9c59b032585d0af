//! # Stock Forecast
//!
//! Ties the forecast pipeline and the visitor counter together behind one
//! request handler, the way a page would use them.
//!
//! ```no_run
//! use stock_forecast::{build_app, AppConfig};
//!
//! let app = build_app(&AppConfig::new("data"))?;
//! let response = app.handle("INFY.NS", 90);
//! if let Ok(report) = &response.outcome {
//!     println!("{}", report.summary);
//! }
//! println!("Visitors: {}", response.hit_count);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod output;

pub use crate::config::AppConfig;
pub use hit_counter::{CounterStore, HitCounter, HttpCounterStore, MemoryStore};
pub use price_forecast::{
    CsvDirectoryProvider, ForecastPipeline, ForecastReport, HistoricalSeriesProvider,
    RequestError,
};

use tracing::info;

/// What one page request produces
#[derive(Debug)]
pub struct AppResponse {
    pub outcome: Result<ForecastReport, RequestError>,
    pub hit_count: u64,
}

/// Forecast pipeline plus visitor counter
pub struct ForecastApp<P, S> {
    pipeline: ForecastPipeline<P>,
    counter: HitCounter<S>,
}

impl<P: HistoricalSeriesProvider, S: CounterStore> ForecastApp<P, S> {
    pub fn new(pipeline: ForecastPipeline<P>, counter: HitCounter<S>) -> Self {
        Self { pipeline, counter }
    }

    /// Count the visit, then forecast `ticker` over `horizon_days`
    pub fn handle(&self, ticker: &str, horizon_days: i64) -> AppResponse {
        let hit_count = self.counter.increment();
        let outcome = self.pipeline.run_request(ticker, horizon_days);
        info!(ticker, horizon_days, hit_count, ok = outcome.is_ok(), "request handled");

        AppResponse { outcome, hit_count }
    }

    pub fn pipeline(&self) -> &ForecastPipeline<P> {
        &self.pipeline
    }

    pub fn counter(&self) -> &HitCounter<S> {
        &self.counter
    }
}

/// App reading CSV histories, counting through whichever store is configured
pub type DefaultApp = ForecastApp<CsvDirectoryProvider, Box<dyn CounterStore>>;

pub fn build_app(config: &AppConfig) -> anyhow::Result<DefaultApp> {
    let pipeline = ForecastPipeline::new(
        CsvDirectoryProvider::new(&config.data_dir),
        config.forecast.clone(),
    )?;

    let (store, retries): (Box<dyn CounterStore>, u32) = match &config.counter {
        Some(counter) => (
            Box::new(HttpCounterStore::new(counter.clone())?),
            counter.max_conflict_retries,
        ),
        None => {
            info!("no hit counter configured, counting in memory");
            (Box::new(MemoryStore::new()), 0)
        }
    };

    Ok(ForecastApp::new(
        pipeline,
        HitCounter::new(store).with_max_conflict_retries(retries),
    ))
}
