use core::fmt::{self, Display};

use ndarray::Array2;
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::{thread_rng, Rng};

use serde::{Deserialize, Serialize};

use crate::activation::Activations;
use crate::error::{Error, Result};

/// Fully-connected stage of a network.
///
/// The first layer of a network has no activation function, the last one
/// has no weights. A layer with `use_bias` feeds an extra constant 1 into
/// the next layer, so its weight matrix has one more column than it has
/// neurons.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Dense {
    neurons: usize,
    activation: Option<Activations>,
    use_bias: bool,
    weights: Option<Array2<f64>>,
}

impl Dense {
    pub fn new(neurons: usize, activation: Option<Activations>, use_bias: bool) -> Result<Dense> {
        if neurons == 0 {
            return Err(Error::Configuration(
                "the number of neurons must be a positive integer".into(),
            ));
        }

        Ok(Dense {
            neurons,
            activation,
            use_bias,
            weights: None,
        })
    }

    /// Build a layer whose activation is looked up by name, ignoring case.
    pub fn named(neurons: usize, activation: &str, use_bias: bool) -> Result<Dense> {
        Dense::new(neurons, Some(Activations::by_name(activation)?), use_bias)
    }

    /// Pass-through layer for raw input.
    pub fn input(neurons: usize, use_bias: bool) -> Result<Dense> {
        Dense::new(neurons, None, use_bias)
    }

    pub fn neurons(&self) -> usize {
        self.neurons
    }

    pub fn activation(&self) -> Option<Activations> {
        self.activation
    }

    pub fn use_bias(&self) -> bool {
        self.use_bias
    }

    pub fn weights(&self) -> Option<&Array2<f64>> {
        self.weights.as_ref()
    }

    pub(crate) fn weights_mut(&mut self) -> Option<&mut Array2<f64>> {
        self.weights.as_mut()
    }

    /// Width of this layer's output, bias unit included.
    pub fn columns(&self) -> usize {
        if self.use_bias {
            self.neurons + 1
        } else {
            self.neurons
        }
    }

    pub fn is_first(&self) -> bool {
        self.activation.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.weights.is_none()
    }

    pub fn initialize_weights(&mut self, next_layer_neurons: usize) -> Result<()> {
        self.initialize_weights_using(next_layer_neurons, &mut thread_rng())
    }

    /// Draw a (next_layer_neurons, columns) matrix from N(0, 1/sqrt(columns)).
    pub fn initialize_weights_using<R: Rng + ?Sized>(
        &mut self,
        next_layer_neurons: usize,
        rng: &mut R,
    ) -> Result<()> {
        if next_layer_neurons == 0 {
            return Err(Error::Configuration(
                "the next layer must have at least one neuron".into(),
            ));
        }

        let shape = (next_layer_neurons, self.columns());
        let scale = (shape.1 as f64).powf(-0.5);
        let normal = Normal::new(0., scale)
            .map_err(|e| Error::Configuration(format!("weight distribution: {}", e)))?;

        self.weights = Some(Array2::random_using(shape, normal, rng));
        Ok(())
    }

    pub(crate) fn drop_activation(&mut self) -> &mut Self {
        self.activation = None;
        self
    }

    pub(crate) fn drop_bias(&mut self) -> &mut Self {
        self.use_bias = false;
        self
    }

    pub(crate) fn clear_weights(&mut self) -> &mut Self {
        self.weights = None;
        self
    }
}

impl Display for Dense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let activation = match self.activation {
            Some(a) => a.name(),
            None => "none",
        };
        write!(
            f,
            "Fully-connected layer [neurons = {}, use_bias = {}, first = {}, last = {}, activation = {}]",
            self.neurons,
            self.use_bias,
            self.is_first(),
            self.is_last(),
            activation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_neurons_is_rejected() {
        assert!(matches!(
            Dense::new(0, Some(Activations::Relu), false),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn unknown_activation_is_lookup_error() {
        assert!(matches!(Dense::named(3, "swish", false), Err(Error::Lookup(_))));
        assert_eq!(
            Dense::named(3, "ReLU", false).unwrap().activation(),
            Some(Activations::Relu)
        );
    }

    #[test]
    fn weight_shape_follows_bias() {
        let mut rng = StdRng::seed_from_u64(1);
        for (neurons, next, bias) in [(1, 1, false), (3, 4, true), (4, 2, false), (7, 5, true)] {
            let mut layer = Dense::new(neurons, Some(Activations::Sigmoid), bias).unwrap();
            layer.initialize_weights_using(next, &mut rng).unwrap();
            let expected = (next, if bias { neurons + 1 } else { neurons });
            assert_eq!(layer.weights().unwrap().dim(), expected);
        }
    }

    #[test]
    fn weights_are_fan_in_scaled() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut layer = Dense::input(100, false).unwrap();
        layer.initialize_weights_using(100, &mut rng).unwrap();

        let w = layer.weights().unwrap();
        let mean = w.sum() / w.len() as f64;
        let var = w.mapv(|v| (v - mean).powi(2)).sum() / w.len() as f64;

        // Expected standard deviation is 1/sqrt(100) = 0.1.
        assert!(mean.abs() < 0.01);
        assert!((var.sqrt() - 0.1).abs() < 0.01);
    }

    #[test]
    fn roles() {
        let mut input = Dense::input(2, true).unwrap();
        let output = Dense::new(1, Some(Activations::Sigmoid), false).unwrap();
        assert!(input.is_first());
        assert!(!output.is_first());
        assert!(output.is_last());

        input.initialize_weights(1).unwrap();
        assert!(!input.is_last());
        assert!(input.to_string().contains("first = true"));
    }
}
