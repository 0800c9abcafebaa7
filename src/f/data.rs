use ndarray::iter::AxisChunksIter;
use ndarray::{Array2, Axis, Ix2};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};

/// Consecutive row chunks of `size`; the last chunk may be shorter.
pub fn batches(x: &Array2<f64>, size: usize) -> Result<AxisChunksIter<'_, f64, Ix2>> {
    if size == 0 {
        return Err(Error::Configuration("batch size must be positive".into()));
    }
    Ok(x.axis_chunks_iter(Axis(0), size))
}

pub fn permutation<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices
}

/// Reorder the rows of `x` and `y` by one shared random permutation.
pub fn shuffle_pairs<R: Rng + ?Sized>(
    x: &Array2<f64>,
    y: &Array2<f64>,
    rng: &mut R,
) -> Result<(Array2<f64>, Array2<f64>)> {
    if x.nrows() != y.nrows() {
        return Err(Error::shape("shuffle", x.shape(), y.shape()));
    }
    let indices = permutation(x.nrows(), rng);
    Ok((x.select(Axis(0), &indices), y.select(Axis(0), &indices)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn batches_keep_short_tail() {
        let x = Array2::<f64>::zeros((7, 2));
        let sizes = batches(&x, 3)
            .unwrap()
            .map(|b| b.nrows())
            .collect::<Vec<usize>>();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let x = Array2::<f64>::zeros((2, 2));
        assert!(matches!(batches(&x, 0), Err(Error::Configuration(_))));
    }

    #[test]
    fn shuffle_keeps_pairs_together() {
        let x = array![[0.], [1.], [2.], [3.], [4.], [5.]];
        let y = x.mapv(|v| v * 10.);
        let mut rng = StdRng::seed_from_u64(7);

        let (sx, sy) = shuffle_pairs(&x, &y, &mut rng).unwrap();

        for (a, b) in sx.iter().zip(sy.iter()) {
            assert_eq!(a * 10., *b);
        }
        let mut seen = sx.iter().copied().collect::<Vec<f64>>();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, vec![0., 1., 2., 3., 4., 5.]);
    }
}
