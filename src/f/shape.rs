use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};
use ndarray_stats::QuantileExt;

use crate::error::{Error, Result};

/// Reshape a flat slice into an (n, 1) column vector.
pub fn column(x: &[f64]) -> Array2<f64> {
    Array1::from(x.to_vec()).insert_axis(Axis(1))
}

pub fn flatten(x: &Array2<f64>) -> Vec<f64> {
    x.iter().copied().collect()
}

pub fn min(x: &Array2<f64>) -> Result<f64> {
    x.min()
        .map(|v| *v)
        .map_err(|e| Error::validation(format!("cannot take minimum: {}", e)))
}

pub fn max(x: &Array2<f64>) -> Result<f64> {
    x.max()
        .map(|v| *v)
        .map_err(|e| Error::validation(format!("cannot take maximum: {}", e)))
}

/// Matrix product that refuses mismatched inner dimensions instead of panicking.
pub fn dot<A, B>(op: &'static str, a: &ArrayBase<A, Ix2>, b: &ArrayBase<B, Ix2>) -> Result<Array2<f64>>
where
    A: Data<Elem = f64>,
    B: Data<Elem = f64>,
{
    if a.ncols() != b.nrows() {
        return Err(Error::shape(op, a.shape(), b.shape()));
    }
    Ok(a.dot(b))
}

/// Elementwise product of two arrays of identical shape. No broadcasting.
pub fn hadamard<A, B>(op: &'static str, a: &ArrayBase<A, Ix2>, b: &ArrayBase<B, Ix2>) -> Result<Array2<f64>>
where
    A: Data<Elem = f64>,
    B: Data<Elem = f64>,
{
    if a.shape() != b.shape() {
        return Err(Error::shape(op, a.shape(), b.shape()));
    }
    Ok(a * b)
}
