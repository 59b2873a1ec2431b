//! # Tidy Vector Store
//!
//! Insertion-ordered storage for image and text embeddings.
//!
//! ## Features
//!
//! - **Locked dimensionality**: the first append fixes `D`, later mismatches are rejected
//! - **All-or-nothing mutation**: a failed append or batch leaves the store untouched
//! - **Persistent storage** with versioned JSON serialization
//! - **Embedder seam** for text/image models, with a deterministic stub backend
//!
//! ## Architecture
//!
//! ```text
//! text / image
//!     │
//!     ├──> Embedder (external model, or StubEmbedder)
//!     │      └─> Vec<f32>[D]
//!     │
//!     ├──> VectorStore
//!     │      └─> IndexedItem { id, embedding } in insertion order
//!     │
//!     └──> Persistent Storage
//!            └─> JSON (schema_version, dimension, items)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use tidy_vector_store::{Embedder, IndexedItem, StubEmbedder, VectorStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let embedder = StubEmbedder::new(512);
//!     let mut store = VectorStore::new();
//!
//!     let vector = embedder.embed_image(b"...jpeg bytes...").await?;
//!     store.append(IndexedItem::new("DCIM/0001.jpg", vector))?;
//!     store.save(".tidy/index.json").await?;
//!
//!     Ok(())
//! }
//! ```

mod embeddings;
mod error;
mod paths;
mod store;
mod types;

pub use embeddings::{EmbedMode, Embedder, StubEmbedder};
pub use error::{Result, VectorStoreError};
pub use paths::{default_store_path_rel, store_path_for_root, STORE_FILE_NAME, TIDY_DIR_NAME};
pub use store::{VectorStore, STORE_SCHEMA_VERSION};
pub use types::{IndexedItem, ItemId};
