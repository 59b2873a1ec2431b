//! # Tidy Indexer
//!
//! Full-rebuild index passes over a photo library.
//!
//! ## Pipeline
//!
//! ```text
//! IndexSource[] (text / image bytes / image path / precomputed vector)
//!     │
//!     ├──> Embedder (one item at a time, cancellable between items)
//!     │      └─> Vec<f32>[D]
//!     │
//!     └──> fresh VectorStore
//!            └─> swapped in only when the pass completes
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tidy_indexer::{load_sources, IndexBuilder};
//! use tidy_vector_store::StubEmbedder;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let builder = IndexBuilder::new(Arc::new(StubEmbedder::new(512)));
//!     let sources = load_sources("library.json").await?;
//!     let (store, stats) = builder.build(sources, &CancellationToken::new()).await?;
//!
//!     println!("Indexed {} items ({} skipped)", stats.items, stats.skipped);
//!     store.save(".tidy/index.json").await?;
//!     Ok(())
//! }
//! ```

mod builder;
mod error;
mod source;
mod stats;

pub use builder::IndexBuilder;
pub use error::{IndexerError, Result};
pub use source::{load_sources, IndexSource, SourcePayload};
pub use stats::IndexStats;
