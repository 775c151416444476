//! Learning strategies.
//!
//! A [`crate::NeuralNet`] never adjusts weights itself. It hands its training
//! data and its live [`Graph`] to an installed [`LearningStrategy`], which reads
//! vertex values (running forward passes as it needs them) and rewrites edge
//! weights in place.
//!
//! The contract is two calls, always in this order:
//!
//! - [`LearningStrategy::set_data`]: receive the dataset and size any buffers for
//!   the graph's topology.
//! - [`LearningStrategy::learn_weights`]: run `iterations` passes, mutating weights.
//!
//! Detecting divergence (non-finite loss) is the strategy's job; the graph lets
//! NaN and infinities propagate as ordinary floats.

use std::fmt;

use crate::{Dataset, Error, Graph, Result};

/// A weight-learning algorithm that operates on a [`Graph`].
pub trait LearningStrategy: fmt::Debug + Send {
    /// Install the training data for the next [`LearningStrategy::learn_weights`] call.
    ///
    /// `graph` is the graph that will be trained; implementations use it to check
    /// dimensions and to size internal buffers.
    fn set_data(&mut self, data: &Dataset, graph: &Graph) -> Result<()>;

    /// Adjust the weights of `graph` over `iterations` passes.
    fn learn_weights(&mut self, graph: &mut Graph, learning_rate: f64, iterations: usize)
    -> Result<()>;

    /// Mean training loss of the most recent iteration, if any ran.
    fn last_loss(&self) -> Option<f64> {
        None
    }

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Instance order within one training iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shuffle {
    /// Visit instances in dataset order.
    #[default]
    None,
    /// Shuffle every iteration with a generator seeded once, when the strategy is
    /// created. The generator and the current order carry over between `learn`
    /// calls, so two `learn(lr, 1)` calls match one `learn(lr, 2)`.
    Seeded(u64),
}

/// Hyperparameters shared by the backprop strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackpropConfig {
    /// L2 penalty coefficient; adds `weight_decay * w` to each weight gradient.
    pub weight_decay: f64,
    pub shuffle: Shuffle,
}

impl Default for BackpropConfig {
    fn default() -> Self {
        Self {
            weight_decay: 0.0,
            shuffle: Shuffle::None,
        }
    }
}

impl BackpropConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.weight_decay.is_finite() && self.weight_decay >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "weight_decay must be finite and >= 0, got {}",
                self.weight_decay
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_learning_args(learning_rate: f64, iterations: usize) -> Result<()> {
    if !(learning_rate.is_finite() && learning_rate > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "learning rate must be finite and > 0, got {learning_rate}"
        )));
    }
    if iterations == 0 {
        return Err(Error::InvalidConfig("iterations must be > 0".to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_decay_must_be_finite_and_non_negative() {
        let mut cfg = BackpropConfig::default();
        assert!(cfg.validate().is_ok());

        cfg.weight_decay = -0.1;
        assert!(cfg.validate().is_err());
        cfg.weight_decay = f64::NAN;
        assert!(cfg.validate().is_err());
        cfg.weight_decay = 1e-3;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn learning_args_are_checked() {
        assert!(validate_learning_args(0.1, 1).is_ok());
        assert!(validate_learning_args(0.0, 1).is_err());
        assert!(validate_learning_args(f64::INFINITY, 1).is_err());
        assert!(validate_learning_args(0.1, 0).is_err());
    }
}
