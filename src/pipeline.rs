//! RAG pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the full ingest-and-query workflow by
//! composing an [`EmbeddingProvider`], a [`ChunkStore`], a [`Chunker`], a
//! [`LengthMeasure`], and an optional [`Generator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docrag::{
//!     InMemoryChunkStore, RagConfig, RagPipeline, RuleBasedSegmenter, SentenceChunker,
//! };
//!
//! let config = RagConfig::default();
//! let chunker = SentenceChunker::from_config(Arc::new(RuleBasedSegmenter), &config)?;
//! let pipeline = RagPipeline::builder()
//!     .config(config)
//!     .embedder(Arc::new(my_embedder))
//!     .store(Arc::new(InMemoryChunkStore::new()))
//!     .chunker(Arc::new(chunker))
//!     .build()?;
//!
//! pipeline.ingest(&document).await?;
//! let retrieved = pipeline.query("what does the handbook say?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::config::RagConfig;
use crate::context::{CharLength, ContextAssembler, LengthMeasure};
use crate::document::{Document, SearchResult, StoredChunk};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::{Generator, build_prompt};
use crate::ranking::rank;
use crate::source::{DocumentSource, TextExtractor};
use crate::store::ChunkStore;

/// Counts from one [`RagPipeline::ingest_source`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Documents successfully ingested.
    pub documents: usize,
    /// Chunks persisted across all ingested documents.
    pub chunks: usize,
    /// Documents skipped because a collaborator failed on them.
    pub skipped: usize,
}

/// Ranked results plus the assembled context for one query.
#[derive(Debug, Clone)]
pub struct RetrievedContext {
    /// Top-ranked chunks, descending by score.
    pub results: Vec<SearchResult>,
    /// The budget-bounded context string assembled from the results.
    pub context: String,
}

/// The RAG pipeline orchestrator.
///
/// Coordinates document ingestion (chunk → embed → persist) and query
/// execution (embed → rank → assemble → generate). Construct one via
/// [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn ChunkStore>,
    chunker: Arc<dyn Chunker>,
    measure: Arc<dyn LengthMeasure>,
    generator: Option<Arc<dyn Generator>>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Ingest a single document: chunk → embed → persist.
    ///
    /// The whole batch of chunk records is embedded before anything is
    /// persisted, so an embedding failure leaves no partial records behind.
    /// Returns the persisted records.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] if embedding or persistence
    /// fails, naming the document in the error message.
    pub async fn ingest(&self, document: &Document) -> Result<Vec<StoredChunk>> {
        let chunks = self.chunker.chunk(document);
        if chunks.is_empty() {
            info!(document.id = %document.id, chunk_count = 0, "ingested document (empty)");
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| {
            error!(document.id = %document.id, error = %e, "embedding failed during ingestion");
            RagError::PipelineError(format!("embedding failed for document '{}': {e}", document.id))
        })?;

        let records: Vec<StoredChunk> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| StoredChunk::from_chunk(chunk, embedding))
            .collect();

        self.store.persist(&records).await.map_err(|e| {
            error!(document.id = %document.id, error = %e, "persist failed during ingestion");
            RagError::PipelineError(format!("persist failed for document '{}': {e}", document.id))
        })?;

        info!(document.id = %document.id, chunk_count = records.len(), "ingested document");
        Ok(records)
    }

    /// Ingest every document a source lists: fetch → extract → ingest.
    ///
    /// A collaborator failure on one document (fetch, extraction, embedding,
    /// persistence) skips that document and continues with the rest; skips
    /// are logged and counted in the returned [`IngestSummary`].
    ///
    /// # Errors
    ///
    /// Returns an error only if listing the source itself fails.
    pub async fn ingest_source(
        &self,
        source: &dyn DocumentSource,
        extractor: &dyn TextExtractor,
    ) -> Result<IngestSummary> {
        let ids = source.list().await?;
        info!(document_count = ids.len(), "ingesting from source");

        let mut summary = IngestSummary::default();
        for id in ids {
            match self.ingest_one(source, extractor, &id).await {
                Ok(chunk_count) => {
                    summary.documents += 1;
                    summary.chunks += chunk_count;
                }
                Err(e) => {
                    error!(document.id = %id, error = %e, "skipping document");
                    summary.skipped += 1;
                }
            }
        }

        info!(
            documents = summary.documents,
            chunks = summary.chunks,
            skipped = summary.skipped,
            "source ingestion complete"
        );
        Ok(summary)
    }

    async fn ingest_one(
        &self,
        source: &dyn DocumentSource,
        extractor: &dyn TextExtractor,
        id: &str,
    ) -> Result<usize> {
        let raw = source.fetch(id).await?;
        let text = extractor.extract(&raw, id)?;
        let document = Document::new(id, text);
        let records = self.ingest(&document).await?;
        Ok(records.len())
    }

    /// Rank stored chunks against a query string.
    ///
    /// Embeds the query, fetches every stored record, and scans it with
    /// [`rank`] using the configured `top_k`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] if embedding or the store fails,
    /// and [`RagError::DimensionMismatch`] untouched — that one is a fatal
    /// configuration problem the caller must see as-is.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await.map_err(|e| {
            error!(error = %e, "embedding failed during query");
            RagError::PipelineError(format!("query embedding failed: {e}"))
        })?;

        let candidates = self.store.fetch_all().await.map_err(|e| {
            error!(error = %e, "chunk store fetch failed");
            RagError::PipelineError(format!("chunk fetch failed: {e}"))
        })?;

        rank(&query_embedding, &candidates, self.config.top_k)
    }

    /// Retrieve top-ranked chunks and assemble them into a bounded context.
    pub async fn query(&self, query: &str) -> Result<RetrievedContext> {
        let results = self.retrieve(query).await?;

        let assembler = ContextAssembler::new(self.config.max_context_length);
        let context =
            assembler.assemble(results.iter().map(|r| r.chunk_text.as_str()), &*self.measure);

        info!(result_count = results.len(), context_len = context.len(), "query completed");
        Ok(RetrievedContext { results, context })
    }

    /// Answer a query end to end: retrieve, assemble, prompt, generate.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if no [`Generator`] was configured,
    /// or [`RagError::PipelineError`] if generation fails.
    pub async fn answer(&self, query: &str) -> Result<String> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| RagError::ConfigError("generator is required for answer".to_string()))?;

        let retrieved = self.query(query).await?;
        let prompt = build_prompt(&retrieved.context, query);

        generator.generate(&prompt).await.map_err(|e| {
            error!(error = %e, "generation failed");
            RagError::PipelineError(format!("generation failed: {e}"))
        })
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// `config`, `embedder`, `store`, and `chunker` are required. `generator`
/// is optional; `length_measure` defaults to [`CharLength`].
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn ChunkStore>>,
    chunker: Option<Arc<dyn Chunker>>,
    measure: Option<Arc<dyn LengthMeasure>>,
    generator: Option<Arc<dyn Generator>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the chunk store backend.
    pub fn store(mut self, store: Arc<dyn ChunkStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the length measure used for context assembly.
    ///
    /// Defaults to [`CharLength`]; pass a tokenizer-backed measure to budget
    /// in tokens instead of characters.
    pub fn length_measure(mut self, measure: Arc<dyn LengthMeasure>) -> Self {
        self.measure = Some(measure);
        self
    }

    /// Set an optional generator for end-to-end answering.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`RagPipeline`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::ConfigError("embedder is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| RagError::ConfigError("store is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::ConfigError("chunker is required".to_string()))?;

        Ok(RagPipeline {
            config,
            embedder,
            store,
            chunker,
            measure: self.measure.unwrap_or_else(|| Arc::new(CharLength)),
            generator: self.generator,
        })
    }
}
