use ndarray::{Array2, Axis};
#[cfg(feature = "plot")]
use plotly::{Bar, Plot};
use tracing::{debug, info, trace};

use super::{EpochLoss, Hyper};
use crate::error::{Error, Result};
use crate::f;
use crate::nn::Network;
use crate::normalize::Normalizer;

/// Mini-batch gradient descent over a borrowed network.
///
/// Each batch runs one forward pass per sample, then a single
/// backpropagation step with the batch-mean error.
pub struct MiniBatchGradientDescent<'a> {
    network: &'a mut Network,
    hyper: Hyper,
}

impl<'a> MiniBatchGradientDescent<'a> {
    pub fn new(network: &'a mut Network) -> MiniBatchGradientDescent<'a> {
        MiniBatchGradientDescent {
            network,
            hyper: Hyper::new(),
        }
    }

    pub fn override_hyper(&mut self, hyper: Hyper) -> &mut Self {
        self.hyper = hyper;
        self
    }

    pub fn hyper(&self) -> &Hyper {
        &self.hyper
    }

    pub fn set_batch_size(&mut self, batch_size: usize) -> &mut Self {
        self.hyper.batch_size = batch_size;
        self
    }

    pub fn set_epochs(&mut self, epochs: usize) -> &mut Self {
        self.hyper.epochs = epochs;
        self
    }

    pub fn set_shuffle(&mut self, shuffle: bool) -> &mut Self {
        self.hyper.shuffle = shuffle;
        self
    }

    pub fn set_normalize(&mut self, normalize: bool) -> &mut Self {
        self.hyper.normalize = normalize;
        self
    }

    pub fn set_scope(&mut self, lo: f64, hi: f64) -> &mut Self {
        self.hyper.scope = (lo, hi);
        self
    }

    pub fn set_epoch_loss(&mut self, epoch_loss: EpochLoss) -> &mut Self {
        self.hyper.epoch_loss = epoch_loss;
        self
    }

    fn rows(data: &[Vec<f64>], width: usize, what: &str) -> Result<Array2<f64>> {
        for (i, row) in data.iter().enumerate() {
            if row.len() != width {
                return Err(Error::validation_at(
                    i,
                    format!(
                        "{} has {} values but the {} layer has {} neurons",
                        what,
                        row.len(),
                        what,
                        width
                    ),
                ));
            }
        }

        let flat = data.iter().flatten().copied().collect::<Vec<f64>>();
        Array2::from_shape_vec((data.len(), width), flat)
            .map_err(|_| Error::shape("dataset", &[data.len(), width], &[data.len()]))
    }

    pub fn train(&mut self, x: &[Vec<f64>], y: &[Vec<f64>]) -> Result<&mut Self> {
        self.hyper.validate()?;

        if x.len() != y.len() {
            return Err(Error::validation(format!(
                "the input data length {} must be equal to the output data length {}",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(Error::validation("no training samples"));
        }

        let mut inputs = Self::rows(x, self.network.input_neurons(), "input")?;
        let mut targets = Self::rows(y, self.network.output_neurons(), "output")?;

        if self.hyper.normalize {
            let normalizer = match self.network.normalizer() {
                Some(n) => *n,
                None => {
                    let n = Normalizer::fit(&inputs, self.hyper.scope)?;
                    debug!(min = n.min, max = n.max, scope = ?n.scope, "normalizer fitted");
                    self.network.set_normalizer(n);
                    n
                }
            };
            inputs = normalizer.transform(&inputs);
        }

        info!(
            samples = x.len(),
            epochs = self.hyper.epochs,
            batch_size = self.hyper.batch_size,
            "training started"
        );

        for epoch in 0..self.hyper.epochs {
            if self.hyper.shuffle {
                (inputs, targets) = f::shuffle_pairs(&inputs, &targets, self.network.rng_mut())?;
            }

            let mut sample_losses: Vec<f64> = Vec::with_capacity(x.len());

            let batches = f::batches(&inputs, self.hyper.batch_size)?
                .zip(f::batches(&targets, self.hyper.batch_size)?);

            for (bx, by) in batches {
                let mut errors = Vec::with_capacity(bx.nrows());
                let mut last_pass = None;

                for (sample, expected) in bx.rows().into_iter().zip(by.rows()) {
                    let sample = sample.to_owned().insert_axis(Axis(1));
                    let expected = expected.to_owned().insert_axis(Axis(1));

                    let pass = self.network.query(&sample)?;
                    let actual = pass
                        .prediction()
                        .ok_or_else(|| Error::Configuration("network has no layers".into()))?;

                    sample_losses.push(f::mean_squared_error(
                        &f::flatten(actual),
                        &f::flatten(&expected),
                    ));
                    if expected.dim() != actual.dim() {
                        return Err(Error::shape("error", expected.shape(), actual.shape()));
                    }
                    errors.push(&expected - actual);
                    last_pass = Some(pass);
                }

                if let Some(pass) = last_pass {
                    self.network.backpropagation(pass, &errors)?;
                    trace!(epoch, samples = errors.len(), "batch applied");
                }
            }

            let loss = match self.hyper.epoch_loss {
                EpochLoss::LastSample => sample_losses.last().copied(),
                EpochLoss::Mean => {
                    Some(sample_losses.iter().sum::<f64>() / sample_losses.len() as f64)
                }
            };

            if let Some(loss) = loss {
                self.network.record_loss(loss);
                debug!("({}/{}) Loss = {}", epoch + 1, self.hyper.epochs, loss);
            }
        }

        info!(
            final_loss = ?self.network.losses().last(),
            "training finished"
        );

        Ok(self)
    }

    #[cfg(feature = "plot")]
    pub fn loss_graph(&mut self) -> &mut Self {
        let mut plot = Plot::new();

        let losses = self.network.losses().to_vec();
        let x = (0..losses.len()).collect::<Vec<usize>>();

        let bars = Bar::new(x, losses);
        plot.add_trace(bars);
        plot.write_html("loss.html");
        plot.show();

        self
    }
}
