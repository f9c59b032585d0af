//! Periodic components of the additive model

use serde::{Deserialize, Serialize};

/// A named periodic term: `order` sine/cosine pairs repeating every `period_days`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalComponent {
    pub name: String,
    pub period_days: f64,
    pub harmonic_order: usize,
}

impl SeasonalComponent {
    pub fn new(name: impl Into<String>, period_days: f64, harmonic_order: usize) -> Self {
        Self {
            name: name.into(),
            period_days,
            harmonic_order,
        }
    }

    /// Roughly monthly cycle, always registered
    pub fn monthly() -> Self {
        Self::new("monthly", 30.5, 5)
    }

    /// Weekly trading cycle, always registered
    pub fn weekly() -> Self {
        Self::new("weekly", 7.0, 3)
    }

    /// Yearly cycle, the model's own default for long histories
    pub fn yearly() -> Self {
        Self::new("yearly", 365.25, 10)
    }

    /// Components registered on every model regardless of the data
    pub fn registered() -> Vec<Self> {
        vec![Self::monthly(), Self::weekly()]
    }

    /// Number of design columns this component contributes
    pub fn columns(&self) -> usize {
        2 * self.harmonic_order
    }
}
