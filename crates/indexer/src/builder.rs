use crate::error::{IndexerError, Result};
use crate::source::{IndexSource, SourcePayload};
use crate::stats::IndexStats;
use std::sync::Arc;
use std::time::Instant;
use tidy_vector_store::{Embedder, IndexedItem, VectorStore, VectorStoreError};
use tokio_util::sync::CancellationToken;

/// Embeds a full set of sources into a fresh [`VectorStore`].
///
/// Every build starts from an empty store (full-rebuild semantics). Cancellation is checked
/// between items; a cancelled or failed build never touches an existing store.
pub struct IndexBuilder {
    embedder: Arc<dyn Embedder>,
}

impl IndexBuilder {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.embedder.dimension()
    }

    /// Build a new store from `sources`, in order.
    ///
    /// Items that fail to embed (unreadable image, model error, NaN or infinite component)
    /// are skipped and recorded in the stats; a vector whose length disagrees with the store
    /// aborts the build.
    pub async fn build(
        &self,
        sources: Vec<IndexSource>,
        cancel: &CancellationToken,
    ) -> Result<(VectorStore, IndexStats)> {
        let start = Instant::now();
        let total = sources.len();
        let mut store = VectorStore::new();
        let mut stats = IndexStats::new();

        log::info!("Building index from {} sources", total);

        for (processed, source) in sources.into_iter().enumerate() {
            if cancel.is_cancelled() {
                log::warn!("Index build cancelled at {}/{}", processed, total);
                return Err(IndexerError::Cancelled { processed, total });
            }

            let IndexSource { id, payload } = source;
            match self.embed(payload).await {
                Ok(embedding) => match store.append(IndexedItem::new(id.clone(), embedding)) {
                    Ok(()) => stats.add_item(),
                    Err(err @ VectorStoreError::NonFiniteEmbedding { .. }) => {
                        log::warn!("Skipping {}: {}", id, err);
                        stats.add_error(format!("{id}: {err}"));
                    }
                    Err(err) => return Err(err.into()),
                },
                Err(err) => {
                    log::warn!("Skipping {}: {}", id, err);
                    stats.add_error(format!("{id}: {err}"));
                }
            }

            if (processed + 1) % 1000 == 0 {
                log::info!("Indexed {}/{}", processed + 1, total);
            }
        }

        stats.time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        log::info!(
            "Index built: {} items, {} skipped in {}ms",
            stats.items,
            stats.skipped,
            stats.time_ms
        );
        Ok((store, stats))
    }

    /// Build from `sources` and swap the result into `store` only if the build succeeds.
    pub async fn rebuild(
        &self,
        store: &mut VectorStore,
        sources: Vec<IndexSource>,
        cancel: &CancellationToken,
    ) -> Result<IndexStats> {
        let (fresh, stats) = self.build(sources, cancel).await?;
        *store = fresh;
        Ok(stats)
    }

    async fn embed(&self, payload: SourcePayload) -> tidy_vector_store::Result<Vec<f32>> {
        match payload {
            SourcePayload::Text(text) => self.embedder.embed_text(&text).await,
            SourcePayload::Image(bytes) => self.embedder.embed_image(&bytes).await,
            SourcePayload::ImagePath(path) => {
                let bytes = tokio::fs::read(&path).await?;
                self.embedder.embed_image(&bytes).await
            }
            SourcePayload::Embedding(embedding) => Ok(embedding),
        }
    }
}
