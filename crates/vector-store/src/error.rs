use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Unsupported embedding mode '{0}' (expected 'stub')")]
    UnsupportedEmbedMode(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unsupported store schema_version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Embedding must have at least one component")]
    EmptyEmbedding,

    #[error("Embedding component {position} is not a finite number")]
    NonFiniteEmbedding { position: usize },
}

impl VectorStoreError {
    /// True for the dimensionality guard failure (query or item length disagrees with D).
    #[must_use]
    pub const fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::InvalidDimension { .. })
    }
}
