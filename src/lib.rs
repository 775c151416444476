//! A feed-forward neural network built as an explicit vertex/edge graph.
//!
//! `layered-net` models a multilayer perceptron literally: every unit is a
//! [`Vertex`] and every weight is an [`Edge`] between vertices of adjacent layers.
//! Weight learning is delegated to a pluggable [`LearningStrategy`] that receives
//! the live graph.
//!
//! # Topology
//!
//! - One input layer, any number of hidden layers, one output layer.
//! - Any layer except the output layer may carry one bias vertex with constant
//!   value `1`, placed first in the layer.
//! - Adjacent layers are fully connected, except that no edge ever ends at a bias
//!   vertex.
//! - Initial weights are uniform in `[0, 2)` from an explicit, seedable generator,
//!   so two builds with the same seed are identical.
//!
//! # Forward propagation
//!
//! Inputs are written into the non-bias vertices of layer 0. Each later non-bias
//! vertex becomes `sigmoid(Σ weight * source value)` over its input edges.
//!
//! # Errors
//!
//! Every fallible operation returns [`Result`]. Bad topology is
//! [`Error::InvalidConfig`], a wrongly shaped weight matrix is
//! [`Error::ShapeMismatch`] (and leaves all weights unchanged), and inputs or
//! datasets that do not fit the graph are [`Error::DimensionMismatch`].
//! NaN and infinities pass through forward propagation untouched; the learning
//! strategies report them as [`Error::Diverged`].
//!
//! # Quick start
//!
//! ```rust
//! use layered_net::{Dataset, NetBuilder};
//!
//! # fn main() -> layered_net::Result<()> {
//! let xs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
//! let ys = vec![vec![0.0], vec![0.0], vec![0.0], vec![1.0]];
//! let train = Dataset::from_rows(&xs, &ys)?;
//!
//! let mut net = NetBuilder::new(2, true)?
//!     .add_layer(3, true)?
//!     .add_layer(1, false)?
//!     .build_with_seed(0)?;
//!
//! net.set_training_data(train.clone())?;
//! net.learn(0.5, 500)?;
//!
//! let errors = net.validation(&train)?;
//! assert_eq!(errors.len(), 4);
//! let _y = net.predict(&[1.0, 1.0])?;
//! # Ok(())
//! # }
//! ```
//!
//! # Custom strategies
//!
//! ```rust
//! use layered_net::{Dataset, Graph, LearningStrategy, NeuralNet, Result};
//!
//! /// Moves every weight halfway to zero each iteration.
//! #[derive(Debug, Default)]
//! struct Shrink;
//!
//! impl LearningStrategy for Shrink {
//!     fn set_data(&mut self, _data: &Dataset, _graph: &Graph) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn learn_weights(&mut self, graph: &mut Graph, _lr: f64, iterations: usize) -> Result<()> {
//!         for _ in 0..iterations {
//!             for edge in graph.edges_mut() {
//!                 edge.set_weight(edge.weight() * 0.5);
//!             }
//!         }
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "shrink"
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let mut net = NeuralNet::new(&[1, 1], &[false, false], Box::new(Shrink))?;
//! net.set_training_data(Dataset::from_rows(&[vec![1.0]], &[vec![0.0]])?)?;
//! net.set_all_weights(&[[4.0]])?;
//! net.learn(0.1, 2)?;
//! assert_eq!(net.graph().weights(), vec![vec![1.0]]);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod backprop;
pub mod builder;
pub mod data;
pub mod edge;
pub mod error;
pub mod graph;
pub mod loss;
pub mod net;
pub mod strategy;
pub mod vertex;

pub use backprop::{BatchBackprop, Gradients, OnlineBackprop};
pub use builder::NetBuilder;
pub use data::Dataset;
pub use edge::{Edge, EdgeId};
pub use error::{Error, Result, ShapeMismatch};
pub use graph::{DEFAULT_SEED, Graph, Summary};
pub use net::NeuralNet;
pub use strategy::{BackpropConfig, LearningStrategy, Shuffle};
pub use vertex::{BIAS_VALUE, Vertex, VertexId};
