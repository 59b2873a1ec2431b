use crate::error::{Result, SearchError};
use serde::Serialize;
use tidy_vector_store::{ItemId, VectorStore, VectorStoreError};

/// One ranked item. `position` is the item's insertion index in the store it was ranked
/// against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub position: usize,
    pub id: ItemId,
    pub score: f32,
}

/// Cosine similarity in [-1, 1].
///
/// Returns 0.0 when either vector has zero norm, when lengths differ, or when the inputs
/// contain non-finite components. Accumulates in f64 so an exact match scores 1.0.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !score.is_finite() {
        return 0.0;
    }
    // `+ 0.0` folds -0.0 into 0.0 so orthogonal items tie under total ordering.
    (score.clamp(-1.0, 1.0) as f32) + 0.0
}

/// Score every item in `store` against `query`, best first.
///
/// Ties keep insertion order. An empty store yields an empty ranking for any query; a
/// non-empty store requires `query.len()` to equal its dimensionality.
pub fn rank(query: &[f32], store: &VectorStore) -> Result<Vec<ScoredResult>> {
    if store.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(expected) = store.dimension() {
        if query.len() != expected {
            return Err(VectorStoreError::InvalidDimension {
                expected,
                actual: query.len(),
            }
            .into());
        }
    }

    let mut results: Vec<ScoredResult> = store
        .all()
        .enumerate()
        .map(|(position, item)| ScoredResult {
            position,
            id: item.id.clone(),
            score: cosine_similarity(query, &item.embedding),
        })
        .collect();

    // `sort_by` is stable: equal scores stay in insertion order.
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    log::debug!(
        "Ranked {} items (top score: {:?})",
        results.len(),
        results.first().map(|r| r.score)
    );
    Ok(results)
}

/// [`rank`], keeping only the best `limit` results.
pub fn rank_top(query: &[f32], store: &VectorStore, limit: usize) -> Result<Vec<ScoredResult>> {
    let mut results = rank(query, store)?;
    results.truncate(limit);
    Ok(results)
}

/// Rank the store against the embedding of an already indexed item.
///
/// Uses the first item with `id`; the probe item itself stays in the output.
pub fn rank_similar(id: &ItemId, store: &VectorStore) -> Result<Vec<ScoredResult>> {
    let (_, probe) = store
        .find(id)
        .ok_or_else(|| SearchError::ItemNotFound(id.clone()))?;
    rank(&probe.embedding, store)
}
