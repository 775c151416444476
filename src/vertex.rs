use crate::edge::EdgeId;

/// Index of a vertex in its graph's vertex arena.
pub type VertexId = usize;

/// Value of every bias vertex.
pub const BIAS_VALUE: f64 = 1.0;

/// A single scalar unit of the network.
///
/// Bias vertices hold [`BIAS_VALUE`] for their whole lifetime and never have
/// input edges. All other vertices start at `0.0` and are overwritten on every
/// forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    value: f64,
    is_bias: bool,
    input_edges: Vec<EdgeId>,
    output_edges: Vec<EdgeId>,
}

impl Vertex {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            value: 0.0,
            is_bias: false,
            input_edges: Vec::new(),
            output_edges: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn bias() -> Self {
        Self {
            value: BIAS_VALUE,
            is_bias: true,
            input_edges: Vec::new(),
            output_edges: Vec::new(),
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn is_bias(&self) -> bool {
        self.is_bias
    }

    /// Edges terminating at this vertex, in creation order.
    #[inline]
    pub fn input_edges(&self) -> &[EdgeId] {
        &self.input_edges
    }

    /// Edges leaving this vertex, in creation order.
    #[inline]
    pub fn output_edges(&self) -> &[EdgeId] {
        &self.output_edges
    }

    #[inline]
    pub(crate) fn set_value(&mut self, value: f64) {
        debug_assert!(!self.is_bias, "bias vertex value is fixed");
        self.value = value;
    }

    #[inline]
    pub(crate) fn add_input_edge(&mut self, edge: EdgeId) {
        debug_assert!(!self.is_bias, "bias vertex cannot have input edges");
        self.input_edges.push(edge);
    }

    #[inline]
    pub(crate) fn add_output_edge(&mut self, edge: EdgeId) {
        self.output_edges.push(edge);
    }
}
