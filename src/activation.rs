//! Activation function.
//!
//! Every non-bias vertex outside the input layer computes a weighted sum of its
//! inputs `z` and stores `sigmoid(z)` as its value. Backprop only needs the
//! derivative expressed through that stored value, so no pre-activation buffer
//! is kept on the graph.

/// Logistic sigmoid `1 / (1 + e^-z)`.
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    // Numerically stable sigmoid.
    if z >= 0.0 {
        let e = (-z).exp();
        1.0 / (1.0 + e)
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Derivative of the sigmoid with respect to its input, expressed in terms
/// of the cached output `y = sigmoid(z)`.
#[inline]
pub fn sigmoid_grad_from_output(y: f64) -> f64 {
    y * (1.0 - y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_basic_values() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(1.0) - 0.731_058_578_630_004_9).abs() < 1e-12);

        assert!(sigmoid(10.0) > 0.9999);
        assert!(sigmoid(-10.0) < 0.0001);
    }

    #[test]
    fn sigmoid_is_symmetric() {
        for &z in &[0.1, 0.5, 2.0, 7.5] {
            assert!((sigmoid(z) + sigmoid(-z) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn sigmoid_saturates_without_nan() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!(sigmoid(f64::NAN).is_nan());
    }

    #[test]
    fn gradient_from_output_matches_numeric() {
        let z = 0.3;
        let eps = 1e-6;
        let numeric = (sigmoid(z + eps) - sigmoid(z - eps)) / (2.0 * eps);
        let analytic = sigmoid_grad_from_output(sigmoid(z));
        assert!((numeric - analytic).abs() < 1e-9);
        assert_eq!(sigmoid_grad_from_output(0.5), 0.25);
    }
}
