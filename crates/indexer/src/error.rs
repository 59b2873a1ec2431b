use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] tidy_vector_store::VectorStoreError),

    #[error("Index build cancelled after {processed} of {total} items")]
    Cancelled { processed: usize, total: usize },
}
