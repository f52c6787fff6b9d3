//! Chunk store trait and the in-memory reference backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::StoredChunk;
use crate::error::Result;

/// Durable storage for chunks and their embeddings.
///
/// The ranker treats the store as a flat unordered collection at query
/// time; [`fetch_all`](ChunkStore::fetch_all) returns every record. Chunks
/// and vectors are owned by the store across the process lifetime; the core
/// components operate on the copies it hands out.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Persist a batch of chunk records.
    ///
    /// A batch must land atomically: either every record is stored or none
    /// is, so no partial-chunk or partial-vector state survives a failure.
    async fn persist(&self, chunks: &[StoredChunk]) -> Result<()>;

    /// Fetch every stored chunk record.
    async fn fetch_all(&self) -> Result<Vec<StoredChunk>>;
}

/// An in-memory [`ChunkStore`] for development and testing.
///
/// Records are held in a `Vec` behind a `tokio::sync::RwLock`, so
/// [`fetch_all`](ChunkStore::fetch_all) preserves insertion order — which is
/// what makes ranking tie-breaks deterministic with this backend.
#[derive(Debug, Default)]
pub struct InMemoryChunkStore {
    chunks: RwLock<Vec<StoredChunk>>,
}

impl InMemoryChunkStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChunkStore for InMemoryChunkStore {
    async fn persist(&self, chunks: &[StoredChunk]) -> Result<()> {
        let mut store = self.chunks.write().await;
        store.extend_from_slice(chunks);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<StoredChunk>> {
        let store = self.chunks.read().await;
        Ok(store.clone())
    }
}
