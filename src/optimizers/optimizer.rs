use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What gets appended to the loss history after each epoch.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EpochLoss {
    /// MSE of the epoch's last sample only.
    #[default]
    LastSample,
    /// MSE averaged over every sample of the epoch.
    Mean,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Hyper {
    pub batch_size: usize,
    pub epochs: usize,
    pub shuffle: bool,
    pub normalize: bool,
    pub scope: (f64, f64),
    pub epoch_loss: EpochLoss,
}

impl Hyper {
    pub fn new() -> Hyper {
        Hyper {
            batch_size: 10,
            epochs: 5,
            shuffle: true,
            normalize: true,
            scope: (0., 1.),
            epoch_loss: EpochLoss::LastSample,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Configuration("batch size must be positive".into()));
        }
        if !(self.scope.0.is_finite() && self.scope.1.is_finite()) {
            return Err(Error::Configuration(format!(
                "normalization scope must be finite, got {:?}",
                self.scope
            )));
        }
        Ok(())
    }
}

impl Default for Hyper {
    fn default() -> Self {
        Hyper::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let h = Hyper::default();
        assert_eq!(h.batch_size, 10);
        assert_eq!(h.epochs, 5);
        assert!(h.shuffle);
        assert!(h.normalize);
        assert_eq!(h.scope, (0., 1.));
        assert_eq!(h.epoch_loss, EpochLoss::LastSample);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let h: Hyper =
            serde_json::from_str(r#"{"epochs": 500, "scope": [-1.0, 1.0], "epoch_loss": "mean"}"#).unwrap();
        assert_eq!(h.epochs, 500);
        assert_eq!(h.scope, (-1., 1.));
        assert_eq!(h.epoch_loss, EpochLoss::Mean);
        assert_eq!(h.batch_size, 10);
        assert!(h.shuffle);
    }

    #[test]
    fn validation() {
        let mut h = Hyper::new();
        h.batch_size = 0;
        assert!(matches!(h.validate(), Err(Error::Configuration(_))));

        let mut h = Hyper::new();
        h.scope = (0., f64::INFINITY);
        assert!(h.validate().is_err());
        assert!(Hyper::new().validate().is_ok());
    }
}
