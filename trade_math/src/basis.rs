//! Basis expansions for additive regression models.

use crate::{MathError, Result};
use std::f64::consts::PI;

/// Fourier columns for a periodic component.
///
/// For every time value `t` (in the same unit as `period`) this produces
/// `2 * order` features, laid out as `sin(2πkt/P), cos(2πkt/P)` for
/// `k = 1..=order`. The returned matrix is row-major: one row per `t`.
pub fn fourier_columns(times: &[f64], period: f64, order: usize) -> Result<Vec<Vec<f64>>> {
    if !(period.is_finite() && period > 0.0) {
        return Err(MathError::InvalidInput(format!(
            "Period must be a positive finite number, got {}",
            period
        )));
    }
    if order == 0 {
        return Err(MathError::InvalidInput(
            "Fourier order must be at least 1".to_string(),
        ));
    }

    let rows = times
        .iter()
        .map(|&t| {
            let mut row = Vec::with_capacity(2 * order);
            for k in 1..=order {
                let angle = 2.0 * PI * k as f64 * t / period;
                row.push(angle.sin());
                row.push(angle.cos());
            }
            row
        })
        .collect();

    Ok(rows)
}

/// Hinge columns `max(0, t - s_j)` for each changepoint `s_j`.
///
/// Adding these to an intercept and slope column gives a continuous
/// piecewise-linear trend whose slope changes by the column's coefficient
/// at every changepoint.
pub fn changepoint_columns(times: &[f64], changepoints: &[f64]) -> Vec<Vec<f64>> {
    times
        .iter()
        .map(|&t| {
            changepoints
                .iter()
                .map(|&s| if t > s { t - s } else { 0.0 })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourier_columns_shape_and_values() {
        let rows = fourier_columns(&[0.0, 1.75, 7.0], 7.0, 3).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 6));

        // t = 0: all sines vanish, all cosines are one
        assert_eq!(rows[0], vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);

        // quarter period: first harmonic sin = 1, cos = 0
        assert!((rows[1][0] - 1.0).abs() < 1e-12);
        assert!(rows[1][1].abs() < 1e-12);

        // one full period repeats t = 0
        for (a, b) in rows[2].iter().zip(rows[0].iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fourier_columns_rejects_bad_parameters() {
        assert!(fourier_columns(&[0.0], 0.0, 3).is_err());
        assert!(fourier_columns(&[0.0], f64::NAN, 3).is_err());
        assert!(fourier_columns(&[0.0], 30.5, 0).is_err());
    }

    #[test]
    fn test_changepoint_columns() {
        let rows = changepoint_columns(&[0.0, 0.5, 1.0], &[0.25, 0.75]);

        assert_eq!(rows[0], vec![0.0, 0.0]);
        assert_eq!(rows[1], vec![0.25, 0.0]);
        assert_eq!(rows[2], vec![0.75, 0.25]);
    }
}
