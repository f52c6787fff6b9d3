//! Document source and text extraction capabilities.
//!
//! Ingestion collaborators: [`DocumentSource`] lists and fetches raw
//! documents (an object store, a directory, a fixture), [`TextExtractor`]
//! turns raw bytes into normalized text. The pipeline skips a document on
//! any collaborator failure without disturbing the rest of the batch.

use async_trait::async_trait;

use crate::error::Result;

/// Lists and fetches raw source documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// List the identifiers of every available document.
    async fn list(&self) -> Result<Vec<String>>;

    /// Fetch the raw bytes of one document.
    async fn fetch(&self, id: &str) -> Result<Vec<u8>>;
}

/// Extracts and normalizes text from a raw document.
pub trait TextExtractor: Send + Sync {
    /// Produce normalized text from raw bytes.
    ///
    /// `filename` lets format-specific extractors dispatch on extension.
    fn extract(&self, raw: &[u8], filename: &str) -> Result<String>;
}

/// Normalize extracted text.
///
/// Collapses whitespace runs to single spaces, trims the ends, and drops
/// characters outside ASCII letters, digits, and `. , ! ?` punctuation.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else if c.is_ascii_alphanumeric() || matches!(c, '.' | ',' | '!' | '?') {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
        // everything else is stripped
    }

    out
}

/// A [`TextExtractor`] for plain-text documents.
///
/// Decodes UTF-8, falling back to Latin-1, then normalizes with
/// [`clean_text`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, raw: &[u8], _filename: &str) -> Result<String> {
        let decoded = match std::str::from_utf8(raw) {
            Ok(text) => text.to_string(),
            // Latin-1 maps every byte to the code point of the same value.
            Err(_) => raw.iter().map(|&b| b as char).collect(),
        };
        Ok(clean_text(&decoded))
    }
}
