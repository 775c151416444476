//! Net builder.
//!
//! `NetBuilder` is the recommended way to define a net. It makes the topology
//! explicit (layer sizes + bias units) and defaults to [`OnlineBackprop`] when no
//! strategy is given.
//!
//! A bias flag belongs to the layer whose outputs it feeds: `bias = true` on a
//! layer adds one constant vertex to it, connected to every non-bias vertex of
//! the next layer. The output layer never gets a bias vertex.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::DEFAULT_SEED;
use crate::{Error, Graph, LearningStrategy, NeuralNet, OnlineBackprop, Result};

#[derive(Debug, Clone, Copy)]
struct LayerSpec {
    size: usize,
    bias: bool,
}

#[derive(Debug)]
/// Builder for a [`NeuralNet`].
///
/// Example:
///
/// ```rust
/// use layered_net::{BatchBackprop, NetBuilder};
///
/// # fn main() -> layered_net::Result<()> {
/// let net = NetBuilder::new(2, true)?
///     .add_layer(3, true)?
///     .add_layer(1, false)?
///     .strategy(BatchBackprop::default())
///     .build_with_seed(0)?;
/// assert_eq!(net.graph().num_vertices(), 3 + 4 + 1);
/// # Ok(())
/// # }
/// ```
pub struct NetBuilder {
    layers: Vec<LayerSpec>,
    strategy: Option<Box<dyn LearningStrategy>>,
}

impl NetBuilder {
    /// Start building a net that accepts inputs of length `input_dim`.
    ///
    /// `bias` adds a bias vertex to the input layer.
    pub fn new(input_dim: usize, bias: bool) -> Result<Self> {
        if input_dim == 0 {
            return Err(Error::InvalidConfig("input_dim must be > 0".to_owned()));
        }
        Ok(Self {
            layers: vec![LayerSpec {
                size: input_dim,
                bias,
            }],
            strategy: None,
        })
    }

    /// Convenience constructor from a sizes list + per-layer bias flags.
    ///
    /// `sizes` includes input and output layers, so its length must be at least 2.
    /// `bias` must have the same length; its last entry is ignored.
    pub fn from_sizes(sizes: &[usize], bias: &[bool]) -> Result<Self> {
        if sizes.len() < 2 {
            return Err(Error::InvalidConfig(
                "sizes must include input and output layers".to_owned(),
            ));
        }
        if bias.len() != sizes.len() {
            return Err(Error::InvalidConfig(format!(
                "bias length {} does not match sizes length {}",
                bias.len(),
                sizes.len()
            )));
        }

        let mut b = Self::new(sizes[0], bias[0])?;
        for (&size, &with_bias) in sizes[1..].iter().zip(&bias[1..]) {
            b = b.add_layer(size, with_bias)?;
        }
        Ok(b)
    }

    /// Append a layer of `size` non-bias vertices.
    ///
    /// `bias` is ignored if this ends up being the output layer.
    pub fn add_layer(mut self, size: usize, bias: bool) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("layer size must be > 0".to_owned()));
        }
        self.layers.push(LayerSpec { size, bias });
        Ok(self)
    }

    /// Install the learning strategy.
    pub fn strategy<S: LearningStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    /// Build with initial weights from [`DEFAULT_SEED`].
    pub fn build(self) -> Result<NeuralNet> {
        self.build_with_seed(DEFAULT_SEED)
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, seed: u64) -> Result<NeuralNet> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build_with_rng(&mut rng)
    }

    /// Build using the provided RNG.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<NeuralNet> {
        if self.layers.len() < 2 {
            return Err(Error::InvalidConfig(
                "net must have at least one layer after the input layer".to_owned(),
            ));
        }

        let sizes: Vec<usize> = self.layers.iter().map(|l| l.size).collect();
        let bias: Vec<bool> = self.layers.iter().map(|l| l.bias).collect();
        let graph = Graph::new_with_rng(&sizes, &bias, rng)?;
        let strategy = self
            .strategy
            .unwrap_or_else(|| Box::new(OnlineBackprop::default()));

        Ok(NeuralNet::from_graph(graph, strategy))
    }
}
