//! Data types for documents, chunks, and search results.

use serde::{Deserialize, Serialize};

/// A source document: an opaque identifier plus its normalized text.
///
/// Produced by an extraction collaborator (see [`TextExtractor`](crate::source::TextExtractor))
/// and immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document (name or storage key).
    pub id: String,
    /// The normalized text content of the document.
    pub text: String,
}

impl Document {
    /// Create a document from an identifier and its normalized text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// A segment of a [`Document`] produced by a chunker, before embedding.
///
/// Chunk identity is the owning document id plus a zero-based sequence
/// index unique within that document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// Zero-based position of this chunk within its document.
    pub index: usize,
    /// The text content of the chunk, overlap prefix included.
    pub text: String,
}

/// The persisted chunk record: a [`Chunk`] with its embedding attached.
///
/// Field names match the durable record shape
/// (`document_name`, `chunk_number`, `chunk_text`, `embedding`) so the
/// serialized form interoperates with other implementations of the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredChunk {
    /// Name of the owning document.
    pub document_name: String,
    /// Zero-based position of this chunk within its document.
    pub chunk_number: usize,
    /// The text content of the chunk.
    pub chunk_text: String,
    /// The fixed-dimensionality embedding vector for this chunk's text.
    pub embedding: Vec<f32>,
}

impl StoredChunk {
    /// Combine a [`Chunk`] with its embedding into a persistable record.
    pub fn from_chunk(chunk: Chunk, embedding: Vec<f32>) -> Self {
        Self {
            document_name: chunk.document_id,
            chunk_number: chunk.index,
            chunk_text: chunk.text,
            embedding,
        }
    }

    /// Chunk identity as `document_name#chunk_number`, used in diagnostics.
    pub fn identity(&self) -> String {
        format!("{}#{}", self.document_name, self.chunk_number)
    }
}

/// A retrieved chunk paired with its similarity score.
///
/// Transient: produced by a ranking call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Name of the owning document.
    pub document_name: String,
    /// Zero-based position of the chunk within its document.
    pub chunk_number: usize,
    /// The text content of the chunk.
    pub chunk_text: String,
    /// Raw dot-product similarity score (higher is more relevant).
    pub score: f32,
}
