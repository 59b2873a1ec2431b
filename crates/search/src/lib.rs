//! # Tidy Search
//!
//! Cosine-similarity ranking over a [`VectorStore`](tidy_vector_store::VectorStore) and the
//! search session that holds what the consumer should currently display.
//!
//! ```text
//! query text ──> Embedder ──> query vector
//!                                  │
//!                 VectorStore ──> rank() ──> Vec<ScoredResult>
//!                      │                          │
//!                      └─> reset_to_default()     └─> apply_query()
//!                                  │                     │
//!                                  └──> SearchSession <──┘
//!                                            │
//!                                        current()
//! ```

mod error;
mod ranker;
mod session;

pub use error::{Result, SearchError};
pub use ranker::{cosine_similarity, rank, rank_similar, rank_top, ScoredResult};
pub use session::{SearchSession, SessionEntry, SessionState};
