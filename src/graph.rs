//! The layered vertex/edge graph.
//!
//! A [`Graph`] owns every [`Vertex`] and [`Edge`] in two arenas. Layers and
//! connection layers are ordered lists of arena indices:
//!
//! - `layers[i]` holds the vertices of layer `i`, with the bias vertex (if any)
//!   in slot 0.
//! - `connection_layers[i]` holds the edges from layer `i` to layer `i + 1`,
//!   source-major: for every vertex of layer `i`, one edge to every non-bias
//!   vertex of layer `i + 1`.
//!
//! The last layer never carries a bias vertex, so its size is the output
//! dimension.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::activation::sigmoid;
use crate::edge::{Edge, EdgeId};
use crate::vertex::{Vertex, VertexId};
use crate::{Dataset, Error, Result, ShapeMismatch, loss};

/// Seed used when no generator is supplied.
pub const DEFAULT_SEED: u64 = 3;

/// Upper bound (exclusive) of the uniform initial weight range `[0, 2)`.
pub const INITIAL_WEIGHT_MAX: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    layers: Vec<Vec<VertexId>>,
    connection_layers: Vec<Vec<EdgeId>>,
    bias: Vec<bool>,
    input_dim: usize,
}

/// Aggregate counts of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub layers: usize,
    pub connection_layers: usize,
    pub vertices: usize,
    pub edges: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} layers, {} connection layers, {} vertices, {} edges",
            self.layers, self.connection_layers, self.vertices, self.edges
        )
    }
}

impl Graph {
    /// Build a graph with initial weights drawn from a generator seeded with `seed`.
    pub fn new_with_seed(sizes: &[usize], bias: &[bool], seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new_with_rng(sizes, bias, &mut rng)
    }

    /// Build a graph with initial weights drawn uniformly from `[0, 2)` using `rng`.
    ///
    /// `sizes[i]` is the number of non-bias vertices in layer `i`. `bias[i]`
    /// adds a bias vertex to layer `i`; the entry for the last layer is ignored.
    pub fn new_with_rng<R: Rng + ?Sized>(
        sizes: &[usize],
        bias: &[bool],
        rng: &mut R,
    ) -> Result<Self> {
        validate_topology(sizes, bias)?;

        let last = sizes.len() - 1;
        let mut vertices = Vec::new();
        let mut layers = Vec::with_capacity(sizes.len());
        for (i, &size) in sizes.iter().enumerate() {
            let with_bias = i != last && bias[i];
            let mut layer = Vec::with_capacity(size + usize::from(with_bias));
            if with_bias {
                layer.push(vertices.len());
                vertices.push(Vertex::bias());
            }
            for _ in 0..size {
                layer.push(vertices.len());
                vertices.push(Vertex::new());
            }
            layers.push(layer);
        }

        let mut edges = Vec::new();
        let mut connection_layers = Vec::with_capacity(last);
        for pair in layers.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let mut connections = Vec::with_capacity(from.len() * to.len());
            for &source in from {
                for &target in to {
                    if vertices[target].is_bias() {
                        continue;
                    }
                    let id = edges.len();
                    edges.push(Edge::new(
                        source,
                        target,
                        rng.gen_range(0.0..INITIAL_WEIGHT_MAX),
                    ));
                    vertices[source].add_output_edge(id);
                    vertices[target].add_input_edge(id);
                    connections.push(id);
                }
            }
            connection_layers.push(connections);
        }

        let graph = Self {
            vertices,
            edges,
            layers,
            connection_layers,
            bias: bias.to_vec(),
            input_dim: sizes[0],
        };
        debug!(summary = %graph.summary(), "built graph");
        Ok(graph)
    }

    #[inline]
    /// Number of non-bias vertices in the input layer.
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    #[inline]
    /// Number of vertices in the output layer.
    pub fn output_dim(&self) -> usize {
        self.output_layer().len()
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn num_connection_layers(&self) -> usize {
        self.connection_layers.len()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            layers: self.num_layers(),
            connection_layers: self.num_connection_layers(),
            vertices: self.num_vertices(),
            edges: self.num_edges(),
        }
    }

    /// Per-layer bias flags as given at construction.
    #[inline]
    pub fn bias_flags(&self) -> &[bool] {
        &self.bias
    }

    /// All layers, each an ordered list of vertex ids.
    #[inline]
    pub fn layers(&self) -> &[Vec<VertexId>] {
        &self.layers
    }

    /// All connection layers, each an ordered list of edge ids.
    #[inline]
    pub fn connection_layers(&self) -> &[Vec<EdgeId>] {
        &self.connection_layers
    }

    #[inline]
    /// Panics if `idx >= num_layers()`.
    pub fn layer(&self, idx: usize) -> &[VertexId] {
        &self.layers[idx]
    }

    #[inline]
    /// Panics if `idx >= num_connection_layers()`.
    pub fn connection_layer(&self, idx: usize) -> &[EdgeId] {
        &self.connection_layers[idx]
    }

    #[inline]
    pub fn output_layer(&self) -> &[VertexId] {
        self.layers
            .last()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[inline]
    /// Panics if `id` is not a vertex of this graph.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    #[inline]
    /// Panics if `id` is not an edge of this graph.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    #[inline]
    /// Panics if `id` is not an edge of this graph.
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id]
    }

    /// All vertices in arena order (layer by layer).
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges in arena order (connection layer by connection layer).
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable view of every edge, in the same order as [`Graph::edges`].
    #[inline]
    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    /// Current values of layer `idx`, bias vertices included.
    pub fn layer_values(&self, idx: usize) -> Option<Vec<f64>> {
        let layer = self.layers.get(idx)?;
        Some(layer.iter().map(|&v| self.vertices[v].value()).collect())
    }

    /// Current weights of connection layer `idx`, in edge order.
    pub fn layer_weights(&self, idx: usize) -> Option<Vec<f64>> {
        let layer = self.connection_layers.get(idx)?;
        Some(layer.iter().map(|&e| self.edges[e].weight()).collect())
    }

    /// Every weight, layer-major and edge-minor. Accepted by [`Graph::set_all_weights`].
    pub fn weights(&self) -> Vec<Vec<f64>> {
        self.connection_layers
            .iter()
            .map(|layer| layer.iter().map(|&e| self.edges[e].weight()).collect())
            .collect()
    }

    /// Overwrite every edge weight from a layer-major, edge-minor matrix.
    ///
    /// All shapes are checked before any weight changes, so on error the graph
    /// is left untouched.
    pub fn set_all_weights<W: AsRef<[f64]>>(&mut self, weights: &[W]) -> Result<()> {
        if weights.len() != self.connection_layers.len() {
            return Err(ShapeMismatch::ConnectionLayers {
                expected: self.connection_layers.len(),
                actual: weights.len(),
            }
            .into());
        }
        for (layer, (row, edges)) in weights.iter().zip(&self.connection_layers).enumerate() {
            let row = row.as_ref();
            if row.len() != edges.len() {
                return Err(ShapeMismatch::Edges {
                    layer,
                    expected: edges.len(),
                    actual: row.len(),
                }
                .into());
            }
        }

        for (row, layer) in weights.iter().zip(&self.connection_layers) {
            for (&w, &e) in row.as_ref().iter().zip(layer) {
                self.edges[e].set_weight(w);
            }
        }
        Ok(())
    }

    /// Forward propagation.
    ///
    /// Writes `input` into the non-bias vertices of layer 0, then recomputes every
    /// non-bias vertex of every later layer as `sigmoid(Σ weight * source value)`.
    /// Bias vertices are never touched.
    pub fn forward(&mut self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_dim {
            return Err(Error::DimensionMismatch(format!(
                "input len {} does not match graph input_dim {}",
                input.len(),
                self.input_dim
            )));
        }

        let Some((first, rest)) = self.layers.split_first() else {
            return Ok(());
        };

        let mut values = input.iter();
        for &v in first {
            if self.vertices[v].is_bias() {
                continue;
            }
            if let Some(&x) = values.next() {
                self.vertices[v].set_value(x);
            }
        }

        for layer in rest {
            for &v in layer {
                if self.vertices[v].is_bias() {
                    continue;
                }
                let mut sum = 0.0;
                for &e in self.vertices[v].input_edges() {
                    let edge = &self.edges[e];
                    sum = edge
                        .weight()
                        .mul_add(self.vertices[edge.source()].value(), sum);
                }
                self.vertices[v].set_value(sigmoid(sum));
            }
        }
        Ok(())
    }

    /// Copy the output layer's current values into `out`.
    pub fn output_into(&self, out: &mut [f64]) -> Result<()> {
        let output = self.output_layer();
        if out.len() != output.len() {
            return Err(Error::DimensionMismatch(format!(
                "output buffer len {} does not match graph output_dim {}",
                out.len(),
                output.len()
            )));
        }
        for (slot, &v) in out.iter_mut().zip(output) {
            *slot = self.vertices[v].value();
        }
        Ok(())
    }

    /// Current values of the output layer.
    pub fn output(&self) -> Vec<f64> {
        self.output_layer()
            .iter()
            .map(|&v| self.vertices[v].value())
            .collect()
    }

    /// Run a forward pass and return the output layer's values.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.forward(input)?;
        Ok(self.output())
    }

    /// Run a forward pass and write the output layer's values into `out`.
    pub fn predict_into(&mut self, input: &[f64], out: &mut [f64]) -> Result<()> {
        if out.len() != self.output_dim() {
            return Err(Error::DimensionMismatch(format!(
                "output buffer len {} does not match graph output_dim {}",
                out.len(),
                self.output_dim()
            )));
        }
        self.forward(input)?;
        self.output_into(out)
    }

    /// Check that `data` fits this graph's input and output dimensions.
    pub fn check_dataset(&self, data: &Dataset) -> Result<()> {
        if data.input_dim() != self.input_dim() {
            return Err(Error::DimensionMismatch(format!(
                "dataset input_dim {} does not match graph input_dim {}",
                data.input_dim(),
                self.input_dim()
            )));
        }
        if data.target_dim() != self.output_dim() {
            return Err(Error::DimensionMismatch(format!(
                "dataset target_dim {} does not match graph output_dim {}",
                data.target_dim(),
                self.output_dim()
            )));
        }
        Ok(())
    }

    /// Per-instance error scores `Σ_j |prediction[j] - target[j]|`, in dataset order.
    ///
    /// Scores are summed across output dimensions, not averaged.
    pub fn validation(&mut self, data: &Dataset) -> Result<Vec<f64>> {
        if data.is_empty() {
            return Err(Error::InvalidData("dataset must not be empty".to_owned()));
        }
        self.check_dataset(data)?;

        let mut pred = vec![0.0; self.output_dim()];
        let mut scores = Vec::with_capacity(data.len());
        for (input, target) in data.iter() {
            self.forward(input)?;
            self.output_into(&mut pred)?;
            scores.push(loss::absolute_error(&pred, target));
        }
        Ok(scores)
    }
}

fn validate_topology(sizes: &[usize], bias: &[bool]) -> Result<()> {
    if sizes.len() < 2 {
        return Err(Error::InvalidConfig(
            "sizes must include input and output layers".to_owned(),
        ));
    }
    if sizes.contains(&0) {
        return Err(Error::InvalidConfig(
            "all layer sizes must be > 0".to_owned(),
        ));
    }
    if bias.len() != sizes.len() {
        return Err(Error::InvalidConfig(format!(
            "bias length {} does not match sizes length {}",
            bias.len(),
            sizes.len()
        )));
    }
    Ok(())
}
