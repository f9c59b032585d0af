//! Additive trend plus seasonality regression
//!
//! The model is `y(t) = trend(t) + Σ seasonal_i(t)`:
//!
//! - the trend is piecewise linear, with automatically placed changepoints
//!   over the early part of the history where the slope may change;
//! - every seasonal component is a truncated Fourier series of its period.
//!
//! Prices are divided by their maximum and time is rescaled to `[0, 1]`
//! over the history before fitting. Priors on the coefficients are applied
//! as ridge penalties, weighted by a noise variance estimated in a first,
//! lightly regularized pass. Fitting is a single deterministic batch solve.

use crate::config::{ForecastConfig, YearlySeasonality};
use crate::data::{ForecastHorizon, HistoricalSeries};
use crate::error::{ForecastError, Result};
use crate::metrics::fit_accuracy;
use crate::models::{
    FitMetadata, ForecastModel, ForecastPoint, ForecastResult, SeasonalComponent,
    TrainedForecastModel,
};
use crate::utils::{add_days, date_range, days_since_epoch};
use chrono::NaiveDate;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;
use trade_math::{changepoint_columns, fourier_columns, RidgeRegression};

/// Prior scale of the trend intercept and base slope
const TREND_PRIOR_SCALE: f64 = 5.0;
/// Noise variance assumed for the first pass, in scaled units
const INITIAL_NOISE_VARIANCE: f64 = 1e-4;
/// Lower bound for the estimated noise variance, in scaled units
const MIN_NOISE_VARIANCE: f64 = 1e-4;
/// Histories at least this long get the yearly component in `Auto` mode
const YEARLY_AUTO_MIN_SPAN_DAYS: i64 = 730;

/// Additive regression model with a piecewise-linear trend
#[derive(Debug, Clone)]
pub struct AdditiveModel {
    name: String,
    config: ForecastConfig,
    seasonalities: Vec<SeasonalComponent>,
}

/// Additive model fitted to a specific history
#[derive(Debug, Clone)]
pub struct TrainedAdditiveModel {
    name: String,
    history_start: NaiveDate,
    history_end: NaiveDate,
    span_days: f64,
    value_scale: f64,
    changepoints: Vec<f64>,
    changepoint_dates: Vec<NaiveDate>,
    seasonalities: Vec<SeasonalComponent>,
    coefficients: Vec<f64>,
    /// Residual standard deviation in scaled units
    residual_std: f64,
    interval_width: f64,
    interval_z: f64,
    observations: usize,
    fitted: Vec<f64>,
    actual: Vec<f64>,
}

impl AdditiveModel {
    /// Create a model with the always-on `monthly` and `weekly` components
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            name: "Additive Regression".to_string(),
            config,
            seasonalities: SeasonalComponent::registered(),
        })
    }

    /// Register an extra seasonal component, replacing one with the same name
    pub fn with_seasonality(mut self, component: SeasonalComponent) -> Result<Self> {
        if !(component.period_days.is_finite() && component.period_days > 0.0) {
            return Err(ForecastError::ValidationError(format!(
                "Seasonality '{}' needs a positive period, got {}",
                component.name, component.period_days
            )));
        }
        if component.harmonic_order == 0 {
            return Err(ForecastError::ValidationError(format!(
                "Seasonality '{}' needs a harmonic order of at least 1",
                component.name
            )));
        }

        self.seasonalities.retain(|s| s.name != component.name);
        self.seasonalities.push(component);
        Ok(self)
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Components registered on this model, before any automatic additions
    pub fn seasonalities(&self) -> &[SeasonalComponent] {
        &self.seasonalities
    }

    /// Components used for a history spanning `span_days`
    fn active_seasonalities(&self, span_days: i64) -> Vec<SeasonalComponent> {
        let mut active = self.seasonalities.clone();
        let has_yearly = active.iter().any(|s| s.name == "yearly");
        let add_yearly = match self.config.yearly_seasonality {
            YearlySeasonality::Enabled => true,
            YearlySeasonality::Disabled => false,
            YearlySeasonality::Auto => span_days >= YEARLY_AUTO_MIN_SPAN_DAYS,
        };
        if add_yearly && !has_yearly {
            active.push(SeasonalComponent::yearly());
        }
        active
    }

    /// Indices of the observations used as changepoints
    fn changepoint_indices(&self, observations: usize) -> Vec<usize> {
        let range_end =
            ((observations as f64) * self.config.changepoint_range).floor() as usize;
        let count = self
            .config
            .n_changepoints
            .min(range_end.saturating_sub(1));
        if count == 0 {
            return Vec::new();
        }

        // Evenly spaced over the first `range_end` observations, skipping the first
        let last = (range_end - 1) as f64;
        (1..=count)
            .map(|i| (last * i as f64 / count as f64).round() as usize)
            .collect()
    }
}

impl ForecastModel for AdditiveModel {
    type Trained = TrainedAdditiveModel;

    fn train(&self, data: &HistoricalSeries) -> Result<Self::Trained> {
        let points = data.points();
        if points.len() < 2 {
            return Err(ForecastError::ModelFit(format!(
                "At least two distinct dates are required, found {}",
                points.len()
            )));
        }
        if let Some(bad) = points
            .iter()
            .find(|p| !(p.price.is_finite() && p.price > 0.0))
        {
            return Err(ForecastError::ModelFit(format!(
                "Prices must be positive and finite, found {} on {}",
                bad.price, bad.date
            )));
        }

        let history_start = data.first().date;
        let history_end = data.last().date;
        let span = data.span_days();
        let value_scale = points.iter().map(|p| p.price.abs()).fold(0.0, f64::max);
        let targets: Vec<f64> = points.iter().map(|p| p.price / value_scale).collect();

        let indices = self.changepoint_indices(points.len());
        let changepoint_dates: Vec<NaiveDate> = indices.iter().map(|&i| points[i].date).collect();
        let seasonalities = self.active_seasonalities(span);

        let mut trained = TrainedAdditiveModel {
            name: self.name.clone(),
            history_start,
            history_end,
            span_days: span as f64,
            value_scale,
            changepoints: Vec::new(),
            changepoint_dates,
            seasonalities,
            coefficients: Vec::new(),
            residual_std: 0.0,
            interval_width: self.config.interval_width,
            interval_z: 0.0,
            observations: points.len(),
            fitted: Vec::new(),
            actual: data.prices(),
        };
        let changepoints: Vec<f64> = trained
            .changepoint_dates
            .iter()
            .map(|&d| trained.scaled_time(d))
            .collect();
        trained.changepoints = changepoints;

        let dates = data.dates();
        let design = trained.design(&dates)?;

        let base_penalties = self.base_penalties(&trained);
        let scaled = |variance: f64| -> Result<RidgeRegression> {
            Ok(RidgeRegression::new(
                base_penalties.iter().map(|p| p * variance).collect(),
            )?)
        };

        let first_pass = scaled(INITIAL_NOISE_VARIANCE)?.fit(&design, &targets)?;
        let noise_variance = first_pass.residual_variance().max(MIN_NOISE_VARIANCE);
        let fit = scaled(noise_variance)?.fit(&design, &targets)?;

        trained.coefficients = fit.coefficients().to_vec();
        trained.residual_std = fit.residual_variance().sqrt();
        trained.interval_z = interval_z(self.config.interval_width)?;
        trained.fitted = design
            .iter()
            .map(|row| fit.predict(row) * value_scale)
            .collect();

        debug!(
            observations = trained.observations,
            changepoints = trained.changepoints.len(),
            seasonalities = trained.seasonalities.len(),
            noise_variance,
            residual_std = trained.residual_std * value_scale,
            "fitted additive model"
        );

        Ok(trained)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl AdditiveModel {
    /// Ridge penalties before weighting by the noise variance
    fn base_penalties(&self, trained: &TrainedAdditiveModel) -> Vec<f64> {
        let trend = 1.0 / TREND_PRIOR_SCALE.powi(2);
        let delta = 1.0 / self.config.changepoint_prior_scale.powi(2);
        let seasonal = 1.0 / self.config.seasonality_prior_scale.powi(2);

        let seasonal_columns: usize = trained.seasonalities.iter().map(|s| s.columns()).sum();

        let mut penalties = vec![trend, trend];
        penalties.extend(std::iter::repeat(delta).take(trained.changepoints.len()));
        penalties.extend(std::iter::repeat(seasonal).take(seasonal_columns));
        penalties
    }
}

impl TrainedAdditiveModel {
    fn scaled_time(&self, date: NaiveDate) -> f64 {
        (date - self.history_start).num_days() as f64 / self.span_days
    }

    /// Design rows: intercept, slope, changepoint hinges, then Fourier terms
    fn design(&self, dates: &[NaiveDate]) -> Result<Vec<Vec<f64>>> {
        let scaled: Vec<f64> = dates.iter().map(|&d| self.scaled_time(d)).collect();
        let epoch_days: Vec<f64> = dates.iter().map(|&d| days_since_epoch(d)).collect();

        let hinges = changepoint_columns(&scaled, &self.changepoints);
        let mut seasonal_blocks = Vec::with_capacity(self.seasonalities.len());
        for component in &self.seasonalities {
            seasonal_blocks.push(fourier_columns(
                &epoch_days,
                component.period_days,
                component.harmonic_order,
            )?);
        }

        let rows = scaled
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let mut row = vec![1.0, t];
                row.extend_from_slice(&hinges[i]);
                for block in &seasonal_blocks {
                    row.extend_from_slice(&block[i]);
                }
                row
            })
            .collect();

        Ok(rows)
    }

    fn evaluate(&self, row: &[f64]) -> f64 {
        let scaled: f64 = row
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, b)| x * b)
            .sum();
        scaled * self.value_scale
    }

    /// Half-width of the uncertainty band `days_ahead` days past the history
    fn band(&self, days_ahead: f64) -> f64 {
        let growth = (1.0 + days_ahead.max(0.0) / self.observations as f64).sqrt();
        self.interval_z * self.residual_std * self.value_scale * growth
    }

    pub fn history_start(&self) -> NaiveDate {
        self.history_start
    }

    pub fn history_end(&self) -> NaiveDate {
        self.history_end
    }

    /// Seasonal components that took part in the fit
    pub fn seasonalities(&self) -> &[SeasonalComponent] {
        &self.seasonalities
    }

    pub fn changepoint_dates(&self) -> &[NaiveDate] {
        &self.changepoint_dates
    }

    fn metadata(&self) -> Result<FitMetadata> {
        Ok(FitMetadata {
            model: self.name.clone(),
            observations: self.observations,
            history_start: self.history_start,
            history_end: self.history_end,
            changepoints: self.changepoint_dates.clone(),
            seasonalities: self.seasonalities.clone(),
            value_scale: self.value_scale,
            residual_std: self.residual_std * self.value_scale,
            interval_width: self.interval_width,
            accuracy: fit_accuracy(&self.actual, &self.fitted)?,
        })
    }
}

impl TrainedForecastModel for TrainedAdditiveModel {
    fn forecast(&self, horizon: ForecastHorizon) -> Result<ForecastResult> {
        let end = add_days(self.history_end, horizon.days())?;
        let dates = date_range(self.history_start, end);
        let design = self.design(&dates)?;

        let points = dates
            .iter()
            .zip(design.iter())
            .map(|(&date, row)| {
                let predicted = self.evaluate(row);
                let half_width = self.band((date - self.history_end).num_days() as f64);
                ForecastPoint {
                    date,
                    predicted,
                    lower: predicted - half_width,
                    upper: predicted + half_width,
                }
            })
            .collect();

        ForecastResult::new(points, self.history_end, self.metadata()?)
    }

    fn predict(&self, data: &HistoricalSeries) -> Result<Vec<f64>> {
        let design = self.design(&data.dates())?;
        Ok(design.iter().map(|row| self.evaluate(row)).collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Two-sided normal quantile for an interval of the given coverage
fn interval_z(width: f64) -> Result<f64> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| ForecastError::ModelFit(e.to_string()))?;
    Ok(normal.inverse_cdf(0.5 + width / 2.0))
}
