//! # docrag
//!
//! A retrieval-augmented generation pipeline: documents are split into
//! overlapping sentence-aware chunks, each chunk is embedded as a
//! fixed-dimension vector, and at query time stored chunks are ranked by
//! dot-product similarity and assembled into a length-budgeted context for
//! a generation model.
//!
//! The three core stages are pure and independently usable:
//!
//! - [`SentenceChunker`] — greedy sentence packing with overlap stitching
//! - [`rank`] / [`BruteForceIndex`] — exhaustive dot-product ranking
//! - [`ContextAssembler`] — budgeted, whole-chunk-or-nothing assembly
//!
//! Everything the core depends on — storage, extraction, sentence
//! segmentation, embedding, length measurement, generation — is a
//! capability trait with a default or feature-gated implementation:
//!
//! - [`ChunkStore`]: [`InMemoryChunkStore`], or `PgChunkStore` behind the
//!   `pgvector` feature
//! - [`EmbeddingProvider`]: `OpenAiEmbedder` behind the `openai` feature
//! - [`SentenceSegmenter`]: [`RuleBasedSegmenter`]
//! - [`LengthMeasure`]: [`CharLength`]
//!
//! [`RagPipeline`] wires the stages together for end-to-end ingest and
//! query.

pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "pgvector")]
pub mod pgvector;
pub mod pipeline;
pub mod ranking;
pub mod segment;
pub mod source;
pub mod store;

pub use chunking::{Chunker, SentenceChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use context::{CharLength, ContextAssembler, LengthMeasure};
pub use document::{Chunk, Document, SearchResult, StoredChunk};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use generation::{Generator, build_prompt};
#[cfg(feature = "openai")]
pub use openai::OpenAiEmbedder;
#[cfg(feature = "pgvector")]
pub use pgvector::PgChunkStore;
pub use pipeline::{IngestSummary, RagPipeline, RagPipelineBuilder, RetrievedContext};
pub use ranking::{BruteForceIndex, VectorIndex, dot_product, rank};
pub use segment::{RuleBasedSegmenter, SentenceSegmenter};
pub use source::{DocumentSource, PlainTextExtractor, TextExtractor, clean_text};
pub use store::{ChunkStore, InMemoryChunkStore};
