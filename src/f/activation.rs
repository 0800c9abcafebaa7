use std::f64::consts::E;

pub fn relu(x: f64) -> f64 {
    if x < 0. {
        return 0.;
    }
    x
}

pub fn relu_derivative(x: f64) -> f64 {
    if x > 0. {
        return 1.;
    }
    0.
}

pub fn sigmoid(x: f64) -> f64 {
    1. / (1. + E.powf(-x))
}

pub fn sigmoid_derivative(x: f64) -> f64 {
    let f = sigmoid(x);
    f * (1. - f)
}

/// ln(1 + e^x), rearranged so large inputs do not overflow.
pub fn softplus(x: f64) -> f64 {
    x.max(0.) + (-x.abs()).exp().ln_1p()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_clamps_negatives() {
        assert_eq!(relu(-2.), 0.);
        assert_eq!(relu(3.5), 3.5);
        assert_eq!(relu_derivative(-1.), 0.);
        assert_eq!(relu_derivative(0.), 0.);
        assert_eq!(relu_derivative(0.1), 1.);
    }

    #[test]
    fn sigmoid_is_centered() {
        assert_eq!(sigmoid(0.), 0.5);
        assert_eq!(sigmoid_derivative(0.), 0.25);
        assert!(sigmoid(10.) > 0.9999);
    }

    #[test]
    fn softplus_matches_definition() {
        for x in [-5., -0.5, 0., 0.5, 5.] {
            let expected = (1. + f64::exp(x)).ln();
            assert!((softplus(x) - expected).abs() < 1e-12);
        }
        assert!(softplus(1000.).is_finite());
    }
}
