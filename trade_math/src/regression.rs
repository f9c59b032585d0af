//! Regularized linear least squares
//!
//! Solves `(XᵀX + Λ) β = Xᵀy` where `Λ` is a diagonal matrix of per-column
//! penalties. A zero penalty leaves the column unregularized. The system is
//! solved through a Cholesky factorization, so the fit is deterministic for
//! identical inputs.

use crate::{MathError, Result};

/// Pivots smaller than this fraction of their diagonal entry count as zero
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Ridge regression with an individual penalty per design column
#[derive(Debug, Clone)]
pub struct RidgeRegression {
    penalties: Vec<f64>,
}

/// Coefficients and residual statistics of a fitted regression
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeFit {
    coefficients: Vec<f64>,
    residual_sum_squares: f64,
    observations: usize,
}

impl RidgeRegression {
    /// Create a solver for a design with `penalties.len()` columns
    pub fn new(penalties: Vec<f64>) -> Result<Self> {
        if penalties.is_empty() {
            return Err(MathError::InvalidInput(
                "At least one design column is required".to_string(),
            ));
        }
        if let Some(bad) = penalties.iter().find(|p| !(p.is_finite() && **p >= 0.0)) {
            return Err(MathError::InvalidInput(format!(
                "Penalties must be finite and non-negative, got {}",
                bad
            )));
        }

        Ok(Self { penalties })
    }

    /// Number of design columns this solver expects
    pub fn columns(&self) -> usize {
        self.penalties.len()
    }

    /// Fit the coefficients to a row-major design matrix
    pub fn fit(&self, rows: &[Vec<f64>], targets: &[f64]) -> Result<RidgeFit> {
        let p = self.penalties.len();

        if rows.len() != targets.len() {
            return Err(MathError::InvalidInput(format!(
                "Design has {} rows but {} targets were given",
                rows.len(),
                targets.len()
            )));
        }
        if rows.is_empty() {
            return Err(MathError::InsufficientData(
                "Cannot fit a regression without observations".to_string(),
            ));
        }
        if let Some(row) = rows.iter().find(|r| r.len() != p) {
            return Err(MathError::InvalidInput(format!(
                "Design row has {} columns, expected {}",
                row.len(),
                p
            )));
        }

        // Normal equations
        let mut gram = vec![vec![0.0; p]; p];
        let mut moment = vec![0.0; p];
        for (row, &y) in rows.iter().zip(targets.iter()) {
            for i in 0..p {
                moment[i] += row[i] * y;
                for j in 0..=i {
                    gram[i][j] += row[i] * row[j];
                }
            }
        }
        for i in 0..p {
            gram[i][i] += self.penalties[i];
            for j in 0..i {
                gram[j][i] = gram[i][j];
            }
        }

        let factor = cholesky(&gram)?;
        let coefficients = cholesky_solve(&factor, &moment);

        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(MathError::CalculationError(
                "Regression produced non-finite coefficients".to_string(),
            ));
        }

        let residual_sum_squares = rows
            .iter()
            .zip(targets.iter())
            .map(|(row, &y)| (y - dot(row, &coefficients)).powi(2))
            .sum();

        Ok(RidgeFit {
            coefficients,
            residual_sum_squares,
            observations: rows.len(),
        })
    }
}

impl RidgeFit {
    /// Fitted coefficients, one per design column
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Sum of squared residuals over the training rows
    pub fn residual_sum_squares(&self) -> f64 {
        self.residual_sum_squares
    }

    /// Mean squared residual over the training rows
    pub fn residual_variance(&self) -> f64 {
        self.residual_sum_squares / self.observations as f64
    }

    /// Evaluate the fitted linear combination for one design row
    pub fn predict(&self, row: &[f64]) -> f64 {
        dot(row, &self.coefficients)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Lower-triangular Cholesky factor of a symmetric positive definite matrix
fn cholesky(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let n = matrix.len();
    let mut lower = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| lower[i][k] * lower[j][k]).sum();
            if i == j {
                let diagonal = matrix[i][i] - sum;
                if !(diagonal.is_finite() && diagonal > matrix[i][i].abs() * PIVOT_TOLERANCE) {
                    return Err(MathError::CalculationError(format!(
                        "Normal equations are not positive definite (pivot {} = {})",
                        i, diagonal
                    )));
                }
                lower[i][j] = diagonal.sqrt();
            } else {
                lower[i][j] = (matrix[i][j] - sum) / lower[j][j];
            }
        }
    }

    Ok(lower)
}

fn cholesky_solve(lower: &[Vec<f64>], rhs: &[f64]) -> Vec<f64> {
    let n = rhs.len();

    // L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let sum: f64 = (0..i).map(|k| lower[i][k] * z[k]).sum();
        z[i] = (rhs[i] - sum) / lower[i][i];
    }

    // Lᵀ x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let sum: f64 = (i + 1..n).map(|k| lower[k][i] * x[k]).sum();
        x[i] = (z[i] - sum) / lower[i][i];
    }

    x
}
