//! Contiguous dataset storage.
//!
//! A [`Dataset`] is an ordered collection of `(input, target)` instances. Rows are
//! stored in two flat row-major buffers so training and validation loops work on
//! slices without per-instance allocation. The buffers are shared, so cloning a
//! dataset (as every learning strategy does in `set_data`) never copies rows.

use std::sync::Arc;

use crate::{Error, Result};

/// A supervised dataset: inputs (X) and targets (Y).
///
/// Stored as contiguous buffers with row-major layout:
/// - `inputs.len() == len * input_dim`
/// - `targets.len() == len * target_dim`
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Arc<[f64]>,
    targets: Arc<[f64]>,
    len: usize,
    input_dim: usize,
    target_dim: usize,
}

impl Dataset {
    /// Build a dataset from flat buffers.
    ///
    /// `inputs` is `(len, input_dim)` and `targets` is `(len, target_dim)`.
    pub fn from_flat(
        inputs: Vec<f64>,
        targets: Vec<f64>,
        input_dim: usize,
        target_dim: usize,
    ) -> Result<Self> {
        if input_dim == 0 {
            return Err(Error::InvalidData("input_dim must be > 0".to_owned()));
        }
        if target_dim == 0 {
            return Err(Error::InvalidData("target_dim must be > 0".to_owned()));
        }
        if inputs.len() % input_dim != 0 {
            return Err(Error::InvalidData(format!(
                "inputs length {} is not divisible by input_dim {}",
                inputs.len(),
                input_dim
            )));
        }

        let len = inputs.len() / input_dim;
        if targets.len() != len * target_dim {
            return Err(Error::InvalidData(format!(
                "targets length {} does not match len * target_dim ({} * {})",
                targets.len(),
                len,
                target_dim
            )));
        }

        Ok(Self {
            inputs: inputs.into(),
            targets: targets.into(),
            len,
            input_dim,
            target_dim,
        })
    }

    /// Build a dataset from per-instance rows.
    ///
    /// Every input row must have the same length, and so must every target row.
    pub fn from_rows(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<Self> {
        if inputs.len() != targets.len() {
            return Err(Error::InvalidData(format!(
                "inputs/targets length mismatch: {} vs {}",
                inputs.len(),
                targets.len()
            )));
        }
        if inputs.is_empty() {
            return Err(Error::InvalidData("dataset must not be empty".to_owned()));
        }

        let input_dim = uniform_row_len("input", inputs)?;
        let target_dim = uniform_row_len("target", targets)?;

        Ok(Self {
            inputs: inputs.concat().into(),
            targets: targets.concat().into(),
            len: inputs.len(),
            input_dim,
            target_dim,
        })
    }

    /// Build a dataset from `(input, target)` pairs.
    pub fn from_instances(instances: &[(Vec<f64>, Vec<f64>)]) -> Result<Self> {
        let (inputs, targets): (Vec<_>, Vec<_>) = instances.iter().cloned().unzip();
        Self::from_rows(&inputs, &targets)
    }

    #[inline]
    /// Returns the number of instances.
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    /// Returns true if there are no instances.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    #[inline]
    pub fn target_dim(&self) -> usize {
        self.target_dim
    }

    #[inline]
    /// Returns the `idx`-th input row.
    ///
    /// Panics if `idx >= len`.
    pub fn input(&self, idx: usize) -> &[f64] {
        let start = idx * self.input_dim;
        &self.inputs[start..start + self.input_dim]
    }

    #[inline]
    /// Returns the `idx`-th target row.
    ///
    /// Panics if `idx >= len`.
    pub fn target(&self, idx: usize) -> &[f64] {
        let start = idx * self.target_dim;
        &self.targets[start..start + self.target_dim]
    }

    /// Iterate over `(input, target)` rows in dataset order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&[f64], &[f64])> + '_ {
        self.inputs
            .chunks_exact(self.input_dim)
            .zip(self.targets.chunks_exact(self.target_dim))
    }
}

fn uniform_row_len(what: &str, rows: &[Vec<f64>]) -> Result<usize> {
    let dim = rows[0].len();
    if dim == 0 {
        return Err(Error::InvalidData(format!("{what} rows must not be empty")));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != dim {
            return Err(Error::InvalidData(format!(
                "{what} row {i} has len {}, expected {dim}",
                row.len()
            )));
        }
    }
    Ok(dim)
}
