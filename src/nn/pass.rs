use ndarray::{concatenate, s, Array2, ArrayView2, Axis};

use crate::error::{Error, Result};
use crate::layers::Dense;

/// Scratch signals of one layer for a single forward/backward pass.
///
/// With `bias` set, a constant 1 row is appended whenever an output is
/// stored, and the trailing row is dropped whenever the error is read.
#[derive(Debug, Clone)]
pub struct Trace {
    bias: bool,
    input: Option<Array2<f64>>,
    output: Array2<f64>,
    error: Array2<f64>,
}

impl Trace {
    pub fn new(bias: bool) -> Trace {
        Trace {
            bias,
            input: None,
            output: Array2::zeros((0, 1)),
            error: Array2::zeros((0, 1)),
        }
    }

    pub fn bias(&self) -> bool {
        self.bias
    }

    /// Pre-activation weighted sum. `None` for the first layer.
    pub fn input(&self) -> Option<&Array2<f64>> {
        self.input.as_ref()
    }

    pub fn set_input(&mut self, input: Array2<f64>) {
        self.input = Some(input);
    }

    pub fn output(&self) -> &Array2<f64> {
        &self.output
    }

    pub fn set_output(&mut self, raw: Array2<f64>) -> Result<()> {
        if !self.bias {
            self.output = raw;
            return Ok(());
        }

        let one: Array2<f64> = Array2::ones((1, raw.ncols()));
        self.output = concatenate(Axis(0), &[raw.view(), one.view()])
            .map_err(|_| Error::shape("bias", raw.shape(), one.shape()))?;
        Ok(())
    }

    /// The error as stored, bias row included.
    pub fn raw_error(&self) -> &Array2<f64> {
        &self.error
    }

    pub fn error(&self) -> ArrayView2<'_, f64> {
        if self.bias && self.error.nrows() > 0 {
            self.error.slice(s![..-1, ..])
        } else {
            self.error.view()
        }
    }

    pub fn set_error(&mut self, error: Array2<f64>) {
        self.error = error;
    }
}

/// Per-layer traces for one sample, index-aligned with the network's layers.
#[derive(Debug, Clone)]
pub struct Pass {
    traces: Vec<Trace>,
}

impl Pass {
    pub fn new(layers: &[Dense]) -> Pass {
        Pass {
            traces: layers.iter().map(|l| Trace::new(l.use_bias())).collect(),
        }
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn trace(&self, i: usize) -> Result<&Trace> {
        self.traces
            .get(i)
            .ok_or_else(|| Error::shape("pass", &[i], &[self.traces.len()]))
    }

    pub fn trace_mut(&mut self, i: usize) -> Result<&mut Trace> {
        let len = self.traces.len();
        self.traces
            .get_mut(i)
            .ok_or_else(|| Error::shape("pass", &[i], &[len]))
    }

    /// Output of the last layer.
    pub fn prediction(&self) -> Option<&Array2<f64>> {
        self.traces.last().map(|t| t.output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn bias_is_appended_to_output() {
        let mut t = Trace::new(true);
        t.set_output(array![[0.2], [0.4], [0.6]]).unwrap();
        assert_eq!(t.output(), &array![[0.2], [0.4], [0.6], [1.]]);
        assert_eq!(t.output()[[3, 0]], 1.);
    }

    #[test]
    fn bias_row_is_stripped_from_error() {
        let mut t = Trace::new(true);
        t.set_error(array![[0.1], [0.2], [0.3]]);
        assert_eq!(t.error(), array![[0.1], [0.2]]);
        assert_eq!(t.raw_error().nrows(), 3);
    }

    #[test]
    fn without_bias_nothing_changes() {
        let mut t = Trace::new(false);
        t.set_output(array![[0.5], [0.7]]).unwrap();
        t.set_error(array![[1.], [2.]]);
        assert_eq!(t.output(), &array![[0.5], [0.7]]);
        assert_eq!(t.error(), array![[1.], [2.]]);
    }
}
