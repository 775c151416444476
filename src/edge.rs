use crate::vertex::VertexId;

/// Index of an edge in its graph's edge arena.
pub type EdgeId = usize;

/// A directed, weighted connection between two vertices of adjacent layers.
///
/// Endpoints are arena indices into the owning [`crate::Graph`], so an edge
/// never owns the vertices it connects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
    weight: f64,
}

impl Edge {
    #[inline]
    pub(crate) fn new(source: VertexId, target: VertexId, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    #[inline]
    pub fn source(&self) -> VertexId {
        self.source
    }

    #[inline]
    pub fn target(&self) -> VertexId {
        self.target
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}
