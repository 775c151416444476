//! Gradient-descent backpropagation over the vertex/edge graph.
//!
//! The loss for one instance is `0.5 * Σ (y - t)^2` over the output vertices.
//! Deltas (`dL/dz` per vertex) are computed from the stored sigmoid outputs,
//! walking layers from the output back to the first hidden layer:
//!
//! - output vertex: `delta = (y - t) * y * (1 - y)`
//! - hidden vertex: `delta = y * (1 - y) * Σ weight * delta(target)` over its output edges
//!
//! and each edge's gradient is `delta(target) * value(source)`.
//!
//! Two strategies are provided:
//!
//! - [`OnlineBackprop`]: update after every instance.
//! - [`BatchBackprop`]: average gradients over the dataset, update once per iteration.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{trace, warn};

use crate::activation::sigmoid_grad_from_output;
use crate::strategy::validate_learning_args;
use crate::vertex::VertexId;
use crate::{BackpropConfig, Dataset, Error, Graph, LearningStrategy, Result, Shuffle};

/// Per-vertex deltas and per-edge weight gradients for a specific [`Graph`].
///
/// Weight gradients accumulate across [`backward`] calls until [`Gradients::zero`].
#[derive(Debug, Clone, Default)]
pub struct Gradients {
    deltas: Vec<f64>,
    d_weights: Vec<f64>,
}

impl Gradients {
    pub fn new(graph: &Graph) -> Self {
        Self {
            deltas: vec![0.0; graph.num_vertices()],
            d_weights: vec![0.0; graph.num_edges()],
        }
    }

    #[inline]
    pub fn zero(&mut self) {
        self.d_weights.fill(0.0);
    }

    /// Delta of vertex `id` from the most recent [`backward`] call.
    #[inline]
    pub fn delta(&self, id: VertexId) -> f64 {
        self.deltas[id]
    }

    /// Accumulated weight gradients, indexed by edge id.
    #[inline]
    pub fn d_weights(&self) -> &[f64] {
        &self.d_weights
    }

    #[inline]
    fn fits(&self, graph: &Graph) -> bool {
        self.deltas.len() == graph.num_vertices() && self.d_weights.len() == graph.num_edges()
    }
}

/// Forward and backward pass for one instance.
///
/// Adds this instance's weight gradients into `grads` and returns its loss.
pub fn backward(
    graph: &mut Graph,
    input: &[f64],
    target: &[f64],
    grads: &mut Gradients,
) -> Result<f64> {
    if target.len() != graph.output_dim() {
        return Err(Error::DimensionMismatch(format!(
            "target len {} does not match graph output_dim {}",
            target.len(),
            graph.output_dim()
        )));
    }
    if !grads.fits(graph) {
        return Err(Error::DimensionMismatch(
            "gradients were not built for this graph".to_owned(),
        ));
    }

    graph.forward(input)?;
    let graph = &*graph;

    let mut loss = 0.0;
    for (&v, &t) in graph.output_layer().iter().zip(target) {
        let y = graph.vertex(v).value();
        let diff = y - t;
        loss = (0.5 * diff).mul_add(diff, loss);
        grads.deltas[v] = diff * sigmoid_grad_from_output(y);
    }

    let layers = graph.layers();
    for layer in layers[1..layers.len() - 1].iter().rev() {
        for &v in layer {
            let vertex = graph.vertex(v);
            if vertex.is_bias() {
                grads.deltas[v] = 0.0;
                continue;
            }
            let mut sum = 0.0;
            for &e in vertex.output_edges() {
                let edge = graph.edge(e);
                sum = edge.weight().mul_add(grads.deltas[edge.target()], sum);
            }
            grads.deltas[v] = sum * sigmoid_grad_from_output(vertex.value());
        }
    }

    for (g, edge) in grads.d_weights.iter_mut().zip(graph.edges()) {
        let source = graph.vertex(edge.source()).value();
        *g = grads.deltas[edge.target()].mul_add(source, *g);
    }

    Ok(loss)
}

/// Gradient descent step: `w -= lr * (scale * grad + weight_decay * w)`.
pub fn sgd_step(graph: &mut Graph, grads: &Gradients, lr: f64, scale: f64, weight_decay: f64) {
    debug_assert!(grads.fits(graph), "gradients were not built for this graph");

    for (edge, &g) in graph.edges_mut().iter_mut().zip(&grads.d_weights) {
        let w = edge.weight();
        edge.set_weight(w - lr * scale.mul_add(g, weight_decay * w));
    }
}

/// Training buffers installed by `set_data`.
///
/// The shuffle generator and the current instance order outlive `set_data`
/// calls, so training in several rounds visits the same sequence of
/// permutations as one long run.
#[derive(Debug, Clone, Default)]
struct Session {
    data: Option<Dataset>,
    grads: Gradients,
    order: Vec<usize>,
    rng: Option<StdRng>,
}

impl Session {
    fn new(shuffle: Shuffle) -> Self {
        Self {
            rng: match shuffle {
                Shuffle::None => None,
                Shuffle::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
            },
            ..Self::default()
        }
    }

    fn prepare(&mut self, data: &Dataset, graph: &Graph) -> Result<()> {
        if data.is_empty() {
            return Err(Error::InvalidData(
                "train dataset must not be empty".to_owned(),
            ));
        }
        graph.check_dataset(data)?;

        // Dataset clones share their row buffers.
        self.data = Some(data.clone());
        if !self.grads.fits(graph) {
            self.grads = Gradients::new(graph);
        }
        if self.order.len() != data.len() {
            self.order = (0..data.len()).collect();
        }
        Ok(())
    }
}

/// Data installed by `set_data`, provided the buffers still match `graph`.
fn installed<'a>(
    data: &'a Option<Dataset>,
    grads: &Gradients,
    graph: &Graph,
) -> Result<&'a Dataset> {
    let data = data.as_ref().ok_or_else(|| {
        Error::InvalidData("learn_weights called before set_data".to_owned())
    })?;
    if !grads.fits(graph) {
        return Err(Error::DimensionMismatch(
            "graph differs from the one passed to set_data".to_owned(),
        ));
    }
    Ok(data)
}

fn check_finite(strategy: &str, loss: f64, iteration: usize) -> Result<()> {
    if !loss.is_finite() {
        warn!(strategy, iteration, loss, "training diverged");
        return Err(Error::Diverged(format!(
            "loss {loss} at iteration {iteration}"
        )));
    }
    Ok(())
}

/// Stochastic backprop: one weight update per instance.
#[derive(Debug, Clone, Default)]
pub struct OnlineBackprop {
    config: BackpropConfig,
    session: Session,
    last_loss: Option<f64>,
}

impl OnlineBackprop {
    pub fn new(config: BackpropConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            session: Session::new(config.shuffle),
            last_loss: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &BackpropConfig {
        &self.config
    }
}

impl LearningStrategy for OnlineBackprop {
    fn set_data(&mut self, data: &Dataset, graph: &Graph) -> Result<()> {
        self.session.prepare(data, graph)
    }

    fn learn_weights(
        &mut self,
        graph: &mut Graph,
        learning_rate: f64,
        iterations: usize,
    ) -> Result<()> {
        validate_learning_args(learning_rate, iterations)?;
        let Session {
            data,
            grads,
            order,
            rng,
        } = &mut self.session;
        let data = installed(data, grads, graph)?;

        for iteration in 0..iterations {
            if let Some(rng) = rng.as_mut() {
                order.shuffle(rng);
            }

            let mut total = 0.0;
            for &idx in order.iter() {
                grads.zero();
                let loss = backward(graph, data.input(idx), data.target(idx), grads)?;
                check_finite("online_backprop", loss, iteration)?;
                sgd_step(graph, grads, learning_rate, 1.0, self.config.weight_decay);
                total += loss;
            }

            let loss = total / data.len() as f64;
            trace!(iteration, loss, "online backprop iteration");
            self.last_loss = Some(loss);
        }
        Ok(())
    }

    fn last_loss(&self) -> Option<f64> {
        self.last_loss
    }

    fn name(&self) -> &'static str {
        "online_backprop"
    }
}

/// Full-batch backprop: gradients are averaged over every instance and applied
/// once per iteration. The configured [`Shuffle`] has no effect.
#[derive(Debug, Clone, Default)]
pub struct BatchBackprop {
    config: BackpropConfig,
    session: Session,
    last_loss: Option<f64>,
}

impl BatchBackprop {
    pub fn new(config: BackpropConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    #[inline]
    pub fn config(&self) -> &BackpropConfig {
        &self.config
    }
}

impl LearningStrategy for BatchBackprop {
    fn set_data(&mut self, data: &Dataset, graph: &Graph) -> Result<()> {
        self.session.prepare(data, graph)
    }

    fn learn_weights(
        &mut self,
        graph: &mut Graph,
        learning_rate: f64,
        iterations: usize,
    ) -> Result<()> {
        validate_learning_args(learning_rate, iterations)?;
        let Session { data, grads, .. } = &mut self.session;
        let data = installed(data, grads, graph)?;
        let scale = 1.0 / data.len() as f64;

        for iteration in 0..iterations {
            grads.zero();
            let mut total = 0.0;
            for (input, target) in data.iter() {
                total += backward(graph, input, target, grads)?;
            }

            let loss = total * scale;
            check_finite("batch_backprop", loss, iteration)?;
            sgd_step(graph, grads, learning_rate, scale, self.config.weight_decay);
            trace!(iteration, loss, "batch backprop iteration");
            self.last_loss = Some(loss);
        }
        Ok(())
    }

    fn last_loss(&self) -> Option<f64> {
        self.last_loss
    }

    fn name(&self) -> &'static str {
        "batch_backprop"
    }
}
