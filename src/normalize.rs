use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::f;

/// Linear map from an observed `[min, max]` range onto a target scope.
///
/// Built once from training data and then applied unchanged to every
/// later training call and prediction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    pub min: f64,
    pub max: f64,
    pub scope: (f64, f64),
}

impl Normalizer {
    pub fn new(min: f64, max: f64, scope: (f64, f64)) -> Normalizer {
        Normalizer { min, max, scope }
    }

    /// Fit on the global minimum and maximum of `x`.
    pub fn fit(x: &Array2<f64>, scope: (f64, f64)) -> Result<Normalizer> {
        Ok(Normalizer::new(f::min(x)?, f::max(x)?, scope))
    }

    pub fn apply(&self, v: f64) -> f64 {
        let (lo, hi) = self.scope;
        let range = self.max - self.min;
        // A constant dataset carries no spread to preserve.
        if range == 0. {
            return lo;
        }
        lo + (v - self.min) * (hi - lo) / range
    }

    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        x.mapv(|v| self.apply(v))
    }
}
