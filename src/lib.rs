//! Minimal multilayer perceptron.
//!
//! A [`Network`] is an ordered stack of fully-connected [`Dense`] layers,
//! trained with mini-batch gradient descent and backpropagation.
//!
//! ```
//! use perceptron::{Dense, Network};
//!
//! let mut nn = Network::new(
//!     vec![
//!         Dense::input(2, true)?,
//!         Dense::named(3, "sigmoid", true)?,
//!         Dense::named(1, "sigmoid", false)?,
//!     ],
//!     0.5,
//! )?;
//!
//! let x = vec![vec![0., 0.], vec![0., 1.], vec![1., 0.], vec![1., 1.]];
//! let y = vec![vec![0.], vec![1.], vec![1.], vec![0.]];
//!
//! nn.get_trainer().set_epochs(100).set_batch_size(1).train(&x, &y)?;
//!
//! assert_eq!(nn.losses().len(), 100);
//! assert_eq!(nn.predict(&[1., 0.])?.len(), 1);
//! # Ok::<(), perceptron::Error>(())
//! ```

mod activation;
mod error;
pub mod f;
pub mod layers;
pub mod nn;
mod normalize;
pub mod optimizers;

pub use activation::{Activation, Activations};
pub use error::{Error, Result};
pub use layers::Dense;
pub use nn::Network;
pub use normalize::Normalizer;
pub use optimizers::{EpochLoss, Hyper, MiniBatchGradientDescent};

pub type Dataset = (Vec<Vec<f64>>, Vec<Vec<f64>>);
