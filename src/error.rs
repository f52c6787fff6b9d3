//! Error types for the `docrag` crate.

use thiserror::Error;

/// Errors that can occur in RAG operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration validation error. Fatal; never retried.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The query vector and a stored vector have different dimensionality.
    ///
    /// This signals an embedding-model mismatch between ingestion and query
    /// time. Vectors are never silently padded or truncated.
    #[error(
        "Embedding dimension mismatch: query has {expected} dimensions, chunk '{chunk}' has {actual}"
    )]
    DimensionMismatch {
        /// Dimensionality of the query vector.
        expected: usize,
        /// Dimensionality of the offending stored vector.
        actual: usize,
        /// Identity of the offending chunk (`document_name#chunk_number`).
        chunk: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the chunk store backend.
    #[error("Store error ({backend}): {message}")]
    StoreError {
        /// The store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while listing or fetching source documents.
    #[error("Source error: {0}")]
    SourceError(String),

    /// An error occurred while extracting text from a raw document.
    #[error("Extraction error ({document}): {message}")]
    ExtractionError {
        /// The document being extracted.
        document: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during the final generation call.
    #[error("Generation error: {0}")]
    GenerationError(String),

    /// An error in the pipeline orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
