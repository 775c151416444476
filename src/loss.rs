//! Per-instance error measures.
//!
//! Validation scores an instance by [`absolute_error`]; the backprop strategies
//! minimize [`squared_error`].

/// Sum of absolute per-dimension errors: `Σ |pred - target|`.
///
/// Shape contract: `pred.len() == target.len()`.
#[inline]
pub fn absolute_error(pred: &[f64], target: &[f64]) -> f64 {
    debug_assert_eq!(
        pred.len(),
        target.len(),
        "pred len {} does not match target len {}",
        pred.len(),
        target.len()
    );

    pred.iter().zip(target).map(|(&p, &t)| (p - t).abs()).sum()
}

/// Half sum of squared errors: `0.5 * Σ (pred - target)^2`.
///
/// Shape contract: `pred.len() == target.len()`.
#[inline]
pub fn squared_error(pred: &[f64], target: &[f64]) -> f64 {
    debug_assert_eq!(
        pred.len(),
        target.len(),
        "pred len {} does not match target len {}",
        pred.len(),
        target.len()
    );

    let mut sum = 0.0;
    for (&p, &t) in pred.iter().zip(target) {
        let d = p - t;
        sum = d.mul_add(d, sum);
    }
    0.5 * sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_error_sums_dimensions() {
        assert_eq!(absolute_error(&[0.5, 0.25], &[1.0, 0.0]), 0.75);
        assert_eq!(absolute_error(&[0.3], &[0.3]), 0.0);
    }

    #[test]
    fn squared_error_is_halved() {
        assert_eq!(squared_error(&[1.0, 0.0], &[0.0, 2.0]), 2.5);
        assert_eq!(squared_error(&[], &[]), 0.0);
    }
}
