use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

use crate::activation::Activation;
use crate::error::{Error, Result};
use crate::f;
use crate::layers::Dense;
use crate::normalize::Normalizer;
use crate::optimizers::{Hyper, MiniBatchGradientDescent};

use super::pass::Pass;

pub const MINIMUM_LAYER_COUNT: usize = 2;

/// Multilayer perceptron: an ordered stack of fully-connected layers.
///
/// Index 0 is the input layer, the last index the output layer. Weights are
/// drawn when the network is built; afterwards only the training loop
/// changes them.
pub struct Network {
    layers: Vec<Dense>,
    learning_rate: f64,
    normalizer: Option<Normalizer>,
    losses: Vec<f64>,
    rng: StdRng,
}

impl Network {
    pub fn new(layers: Vec<Dense>, learning_rate: f64) -> Result<Network> {
        Network::build(layers, learning_rate, StdRng::from_entropy())
    }

    /// Same as `new`, with weight initialization and shuffling driven by `seed`.
    pub fn seeded(layers: Vec<Dense>, learning_rate: f64, seed: u64) -> Result<Network> {
        Network::build(layers, learning_rate, StdRng::seed_from_u64(seed))
    }

    fn build(mut layers: Vec<Dense>, learning_rate: f64, mut rng: StdRng) -> Result<Network> {
        if layers.len() < MINIMUM_LAYER_COUNT {
            return Err(Error::Configuration(format!(
                "the minimum allowable number of layers is {}, got {}",
                MINIMUM_LAYER_COUNT,
                layers.len()
            )));
        }

        if !(learning_rate > 0. && learning_rate <= 1.) {
            return Err(Error::Configuration(format!(
                "learning rate must be within (0, 1], not {}",
                learning_rate
            )));
        }

        let last = layers.len() - 1;

        if let Some(activation) = layers[0].activation() {
            warn!(%activation, "the input layer does not need an activation function, ignoring it");
            layers[0].drop_activation();
        }

        if layers[last].use_bias() {
            warn!("the output layer does not need a bias unit, ignoring it");
            layers[last].drop_bias();
        }

        for (i, layer) in layers.iter().enumerate().skip(1) {
            if layer.activation().is_none() {
                return Err(Error::Configuration(format!(
                    "layer {} has no activation function; only the input layer may omit one",
                    i
                )));
            }
        }

        for i in 0..last {
            let next_neurons = layers[i + 1].neurons();
            layers[i].initialize_weights_using(next_neurons, &mut rng)?;
        }
        layers[last].clear_weights();

        debug!(
            layers = ?layers.iter().map(|l| l.neurons()).collect::<Vec<usize>>(),
            learning_rate,
            "network built"
        );

        Ok(Network {
            layers,
            learning_rate,
            normalizer: None,
            losses: vec![],
            rng,
        })
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Normalizer fitted by the first training call that asked for one.
    pub fn normalizer(&self) -> Option<&Normalizer> {
        self.normalizer.as_ref()
    }

    /// One loss value per completed epoch, across all training calls.
    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    pub fn input_neurons(&self) -> usize {
        self.layers[0].neurons()
    }

    pub fn output_neurons(&self) -> usize {
        self.layers[self.layers.len() - 1].neurons()
    }

    pub(crate) fn set_normalizer(&mut self, normalizer: Normalizer) {
        self.normalizer = Some(normalizer);
    }

    pub(crate) fn record_loss(&mut self, loss: f64) {
        self.losses.push(loss);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn weights(&self, i: usize) -> Result<&Array2<f64>> {
        self.layers[i]
            .weights()
            .ok_or_else(|| Error::Configuration(format!("layer {} has no weights", i)))
    }

    fn activation(&self, i: usize) -> Result<Activation> {
        self.layers[i]
            .activation()
            .map(|a| a.wake())
            .ok_or_else(|| Error::Configuration(format!("layer {} has no activation function", i)))
    }

    /// Forward pass of a single column vector.
    ///
    /// Leaves the weights untouched and returns every layer's signals, which
    /// `backpropagation` needs.
    pub fn query(&self, x: &Array2<f64>) -> Result<Pass> {
        let mut pass = Pass::new(&self.layers);
        pass.trace_mut(0)?.set_output(x.clone())?;

        for i in 0..self.layers.len() - 1 {
            let z = f::dot("query", self.weights(i)?, pass.trace(i)?.output())?;
            let a = self.activation(i + 1)?.a(&z);

            let next = pass.trace_mut(i + 1)?;
            next.set_input(z);
            next.set_output(a)?;
        }

        Ok(pass)
    }

    /// Update every weight matrix from the mean of `errors` (expected minus
    /// predicted, one column vector per sample).
    ///
    /// Layer signals come from `pass`, the context of the batch's last query.
    pub fn backpropagation(&mut self, mut pass: Pass, errors: &[Array2<f64>]) -> Result<()> {
        let (first, rest) = errors
            .split_first()
            .ok_or_else(|| Error::validation("no errors to backpropagate"))?;

        let mut mean_error = first.clone();
        for e in rest {
            if e.dim() != mean_error.dim() {
                return Err(Error::shape("mean error", mean_error.shape(), e.shape()));
            }
            mean_error += e;
        }
        mean_error.mapv_inplace(|v| v / errors.len() as f64);

        let last = self.layers.len() - 1;
        pass.trace_mut(last)?.set_error(mean_error);

        for i in (0..last).rev() {
            let (propagated, gradient) = {
                let next = pass.trace(i + 1)?;
                let next_error = next.error();
                let next_input = next
                    .input()
                    .ok_or_else(|| Error::Configuration(format!("layer {} was never queried", i + 1)))?;

                let propagated = f::dot("backpropagation", &self.weights(i)?.t(), &next_error)?;
                let delta = f::hadamard(
                    "backpropagation",
                    &next_error,
                    &self.activation(i + 1)?.d(next_input),
                )?;
                let gradient = f::dot("backpropagation", &delta, &pass.trace(i)?.output().t())?;

                (propagated, gradient)
            };

            pass.trace_mut(i)?.set_error(propagated);

            let rate = self.learning_rate;
            let weights = self.layers[i]
                .weights_mut()
                .ok_or_else(|| Error::Configuration(format!("layer {} has no weights", i)))?;
            if weights.dim() != gradient.dim() {
                return Err(Error::shape("weight update", weights.shape(), gradient.shape()));
            }
            weights.scaled_add(rate, &gradient);

            trace!(layer = i, "weights updated");
        }

        Ok(())
    }

    /// Network response for one sample, normalized the same way the training
    /// data was.
    pub fn predict(&self, data: &[f64]) -> Result<Vec<f64>> {
        if data.len() != self.input_neurons() {
            return Err(Error::validation(format!(
                "got {} values but the input layer has {} neurons",
                data.len(),
                self.input_neurons()
            )));
        }

        let mut x = f::column(data);
        if let Some(normalizer) = &self.normalizer {
            x = normalizer.transform(&x);
        }

        let pass = self.query(&x)?;
        let y = pass
            .prediction()
            .ok_or_else(|| Error::Configuration("network has no layers".into()))?;

        Ok(f::flatten(y))
    }

    pub fn get_trainer(&mut self) -> MiniBatchGradientDescent<'_> {
        MiniBatchGradientDescent::new(self)
    }

    pub fn train(&mut self, x: &[Vec<f64>], y: &[Vec<f64>], hyper: Hyper) -> Result<()> {
        self.get_trainer().override_hyper(hyper).train(x, y)?;
        Ok(())
    }
}
