//! Model and normalization settings

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Default minimum history: two full cycles of the 30.5-day monthly component
pub const DEFAULT_MIN_HISTORY_POINTS: usize = 61;

/// Whether the yearly seasonal component is part of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum YearlySeasonality {
    /// Enabled when the history spans at least two years
    #[default]
    Auto,
    Enabled,
    Disabled,
}

/// Settings for the forecast pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Fewest observations accepted by the normalizer
    pub min_history_points: usize,
    /// Upper bound on automatically placed trend changepoints
    pub n_changepoints: usize,
    /// Fraction of the history in which changepoints may be placed
    pub changepoint_range: f64,
    /// Prior scale of the trend rate adjustments; smaller is stiffer
    pub changepoint_prior_scale: f64,
    /// Prior scale of the seasonal coefficients
    pub seasonality_prior_scale: f64,
    /// Coverage of the uncertainty band around each prediction
    pub interval_width: f64,
    /// Yearly seasonality switch
    pub yearly_seasonality: YearlySeasonality,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_history_points: DEFAULT_MIN_HISTORY_POINTS,
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            interval_width: 0.8,
            yearly_seasonality: YearlySeasonality::Auto,
        }
    }
}

impl ForecastConfig {
    /// Check every setting for a usable value
    pub fn validate(&self) -> Result<()> {
        if self.min_history_points < 2 {
            return Err(ForecastError::ValidationError(
                "min_history_points must be at least 2".to_string(),
            ));
        }
        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return Err(ForecastError::ValidationError(format!(
                "changepoint_range must be in (0, 1], got {}",
                self.changepoint_range
            )));
        }
        for (name, value) in [
            ("changepoint_prior_scale", self.changepoint_prior_scale),
            ("seasonality_prior_scale", self.seasonality_prior_scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ForecastError::ValidationError(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::ValidationError(format!(
                "interval_width must be in (0, 1), got {}",
                self.interval_width
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ForecastConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut config = ForecastConfig::default();
        config.interval_width = 1.0;
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.changepoint_prior_scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.min_history_points = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ForecastConfig =
            serde_json::from_str(r#"{"min_history_points": 90, "yearly_seasonality": "disabled"}"#)
                .unwrap();

        assert_eq!(config.min_history_points, 90);
        assert_eq!(config.yearly_seasonality, YearlySeasonality::Disabled);
        assert_eq!(config.n_changepoints, 25);
    }
}
