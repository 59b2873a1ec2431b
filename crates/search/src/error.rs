use thiserror::Error;
use tidy_vector_store::ItemId;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] tidy_vector_store::VectorStoreError),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Session has no indexed items to query")]
    SessionEmpty,
}

impl SearchError {
    #[must_use]
    pub const fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::VectorStoreError(err) if err.is_dimension_mismatch())
    }
}
