//! Brute-force similarity ranking over stored chunk vectors.
//!
//! This module provides the pure [`rank`] function, the [`VectorIndex`]
//! abstraction for pluggable search backends, and [`BruteForceIndex`], the
//! exhaustive-scan implementation over a [`ChunkStore`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::document::{SearchResult, StoredChunk};
use crate::error::{RagError, Result};
use crate::store::ChunkStore;

/// Compute the raw inner product of two equal-length vectors.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Rank candidates by raw dot-product similarity to the query vector.
///
/// Scores are raw inner products, not cosine similarity — vectors are
/// assumed to carry comparable magnitude from the embedding model. The sort
/// is stable, so candidates with equal scores keep their input order, and
/// the result is truncated to `top_n` entries.
///
/// This is an exhaustive O(n·d + n log n) scan; it is only viable while the
/// candidate set fits in memory. Larger corpora belong behind a different
/// [`VectorIndex`] backend.
///
/// # Errors
///
/// Returns [`RagError::DimensionMismatch`] if any candidate vector's
/// dimensionality differs from the query's. Mismatches signal an
/// embedding-model mismatch between ingestion and query time and are never
/// papered over by padding or truncation.
pub fn rank(query: &[f32], candidates: &[StoredChunk], top_n: usize) -> Result<Vec<SearchResult>> {
    let mut scored = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if candidate.embedding.len() != query.len() {
            return Err(RagError::DimensionMismatch {
                expected: query.len(),
                actual: candidate.embedding.len(),
                chunk: candidate.identity(),
            });
        }
        scored.push(SearchResult {
            document_name: candidate.document_name.clone(),
            chunk_number: candidate.chunk_number,
            chunk_text: candidate.chunk_text.clone(),
            score: dot_product(query, &candidate.embedding),
        });
    }

    // sort_by is stable: equal scores keep candidate insertion order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_n);
    Ok(scored)
}

/// A search backend over stored chunk vectors.
///
/// Abstracts exact or approximate nearest-neighbor search so alternative
/// backends can be substituted without changing the ranking contract.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return the `top_n` most similar chunks to the query vector, ordered
    /// by descending score.
    async fn search(&self, query: &[f32], top_n: usize) -> Result<Vec<SearchResult>>;
}

/// Exhaustive-scan [`VectorIndex`] over a [`ChunkStore`].
///
/// Fetches every stored record and ranks it with [`rank`]. This is the
/// reference behavior; its cost grows linearly with the corpus.
pub struct BruteForceIndex {
    store: Arc<dyn ChunkStore>,
}

impl BruteForceIndex {
    /// Create an index over the given store.
    pub fn new(store: Arc<dyn ChunkStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VectorIndex for BruteForceIndex {
    async fn search(&self, query: &[f32], top_n: usize) -> Result<Vec<SearchResult>> {
        let candidates = self.store.fetch_all().await?;
        rank(query, &candidates, top_n)
    }
}
