//! Sentence-aware document chunking with overlap stitching.
//!
//! This module provides the [`Chunker`] trait and [`SentenceChunker`], which
//! packs whole sentences into chunks of a configured character budget and
//! prefixes every chunk after the first with the trailing characters of its
//! predecessor.

use std::sync::Arc;

use crate::config::RagConfig;
use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};
use crate::segment::SentenceSegmenter;

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and identity but no
/// embeddings. Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into an ordered sequence of chunks.
    ///
    /// Returns an empty `Vec` if the document yields no sentences.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Packs sentences greedily into chunks, then stitches overlap between them.
///
/// A sentence joins the current buffer (space-separated) while
/// `buffer length + sentence length < chunk_size`, measured in characters;
/// otherwise the buffer is finalized and the sentence starts a new one.
/// Sentences are never split, so a single sentence longer than `chunk_size`
/// is emitted as one oversized chunk.
///
/// Every chunk after the first is prefixed with the last `chunk_overlap`
/// characters of the previous *raw* chunk, so overlap never compounds
/// across chunks. A raw chunk shorter than `chunk_overlap` contributes its
/// entire text.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use docrag::{RuleBasedSegmenter, SentenceChunker};
///
/// let chunker = SentenceChunker::new(Arc::new(RuleBasedSegmenter), 1500, 300)?;
/// let chunks = chunker.chunk(&document);
/// ```
pub struct SentenceChunker {
    segmenter: Arc<dyn SentenceSegmenter>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl std::fmt::Debug for SentenceChunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceChunker")
            .field("chunk_size", &self.chunk_size)
            .field("chunk_overlap", &self.chunk_overlap)
            .finish_non_exhaustive()
    }
}

impl SentenceChunker {
    /// Create a new `SentenceChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size`.
    pub fn new(
        segmenter: Arc<dyn SentenceSegmenter>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::ConfigError("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::ConfigError(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { segmenter, chunk_size, chunk_overlap })
    }

    /// Create a `SentenceChunker` using the sizes from a [`RagConfig`].
    pub fn from_config(segmenter: Arc<dyn SentenceSegmenter>, config: &RagConfig) -> Result<Self> {
        Self::new(segmenter, config.chunk_size, config.chunk_overlap)
    }

    /// Pack sentences into raw (unstitched) chunks.
    fn pack(&self, sentences: Vec<String>) -> Vec<String> {
        let mut packed = Vec::new();
        let mut buffer = String::new();
        let mut buffer_len = 0;

        for sentence in sentences {
            let sentence_len = sentence.chars().count();
            if buffer_len + sentence_len < self.chunk_size {
                if !buffer.is_empty() {
                    buffer.push(' ');
                    buffer_len += 1;
                }
                buffer.push_str(&sentence);
                buffer_len += sentence_len;
            } else {
                if !buffer.is_empty() {
                    packed.push(std::mem::take(&mut buffer).trim().to_string());
                }
                buffer = sentence;
                buffer_len = sentence_len;
            }
        }

        if !buffer.is_empty() {
            packed.push(buffer.trim().to_string());
        }

        packed
    }
}

/// Return the last `n` characters of `text`, or all of it if shorter.
fn char_suffix(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let total = text.chars().count();
    if total <= n {
        return text;
    }
    match text.char_indices().nth(total - n) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

impl Chunker for SentenceChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let sentences = self.segmenter.segment(&document.text);
        if sentences.is_empty() {
            return Vec::new();
        }

        let packed = self.pack(sentences);

        packed
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let text = if i == 0 || self.chunk_overlap == 0 {
                    raw.clone()
                } else {
                    // Overlap comes from the raw predecessor, not the
                    // already-stitched one.
                    format!("{} {}", char_suffix(&packed[i - 1], self.chunk_overlap), raw)
                };
                Chunk { document_id: document.id.clone(), index: i, text }
            })
            .collect()
    }
}
