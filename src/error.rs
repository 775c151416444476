use thiserror::Error;

/// Which dimension of a bulk weight matrix did not match the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    #[error("expected {expected} connection layers, got {actual}")]
    ConnectionLayers { expected: usize, actual: usize },
    #[error("connection layer {layer} has {expected} edges, got {actual} weights")]
    Edges {
        layer: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("weight shape mismatch: {0}")]
    ShapeMismatch(ShapeMismatch),
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("training diverged: {0}")]
    Diverged(String),
}

impl From<ShapeMismatch> for Error {
    fn from(value: ShapeMismatch) -> Self {
        Error::ShapeMismatch(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
