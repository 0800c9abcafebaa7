use std::fmt::{self, Display};
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::f;

/// A function and its derivative, both applied elementwise.
#[derive(Clone, Copy)]
pub struct Activation {
    f: fn(f64) -> f64,
    df: fn(f64) -> f64,
}

impl Activation {
    pub fn a(&self, x: &Array2<f64>) -> Array2<f64> {
        x.mapv(self.f)
    }

    pub fn d(&self, x: &Array2<f64>) -> Array2<f64> {
        x.mapv(self.df)
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivationFn")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activations {
    Relu,
    Sigmoid,
    SoftPlus,
}

impl Activations {
    pub const ALL: [Activations; 3] = [Activations::Relu, Activations::Sigmoid, Activations::SoftPlus];

    pub fn wake(&self) -> Activation {
        match self {
            Activations::Relu => Activation {
                f: f::relu,
                df: f::relu_derivative,
            },
            Activations::Sigmoid => Activation {
                f: f::sigmoid,
                df: f::sigmoid_derivative,
            },
            // d/dx ln(1 + e^x) is the logistic function itself.
            Activations::SoftPlus => Activation {
                f: f::softplus,
                df: f::sigmoid,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activations::Relu => "ReLu",
            Activations::Sigmoid => "Sigmoid",
            Activations::SoftPlus => "SoftPlus",
        }
    }

    pub fn nickname(&self) -> &'static str {
        match self {
            Activations::Relu => "Rectified linear unit",
            Activations::Sigmoid => "Soft step",
            Activations::SoftPlus => "Softplus",
        }
    }

    /// Case-insensitive lookup.
    pub fn by_name(name: &str) -> Result<Activations, Error> {
        Activations::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::Lookup(name.to_string()))
    }
}

impl FromStr for Activations {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activations::by_name(s)
    }
}

impl Display for Activations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Activations::by_name("relu").unwrap(), Activations::Relu);
        assert_eq!(Activations::by_name("SIGMOID").unwrap(), Activations::Sigmoid);
        assert_eq!("softplus".parse::<Activations>().unwrap(), Activations::SoftPlus);
    }

    #[test]
    fn unknown_name_is_lookup_error() {
        assert_eq!(
            Activations::by_name("tanh"),
            Err(Error::Lookup("tanh".to_string()))
        );
    }

    #[test]
    fn relu_wakes_elementwise() {
        let x = array![[-1.], [0.], [2.]];
        let relu = Activations::Relu.wake();
        assert_eq!(relu.a(&x), array![[0.], [0.], [2.]]);
        assert_eq!(relu.d(&x), array![[0.], [0.], [1.]]);
    }

    #[test]
    fn softplus_derivative_is_sigmoid() {
        let x = array![[-3.], [0.], [1.5]];
        let softplus = Activations::SoftPlus.wake();
        let sigmoid = Activations::Sigmoid.wake();
        assert_eq!(softplus.d(&x), sigmoid.a(&x));
    }
}
