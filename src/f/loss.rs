pub fn mean_squared_error(pred: &[f64], actual: &[f64]) -> f64 {
    let diff = actual
        .iter()
        .zip(pred.iter())
        .map(|(e, p)| (e - p).powi(2))
        .collect::<Vec<f64>>();

    diff.into_iter().fold(0. as f64, |a, e| a + e) / pred.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_of_identical_is_zero() {
        assert_eq!(mean_squared_error(&[0.3, 0.7], &[0.3, 0.7]), 0.);
    }

    #[test]
    fn mse_averages_over_features() {
        assert_eq!(mean_squared_error(&[1., 0.], &[0., 0.]), 0.5);
    }
}
