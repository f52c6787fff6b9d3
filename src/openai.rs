//! OpenAI-compatible embedding provider.
//!
//! This module is only available when the `openai` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The default OpenAI embeddings API endpoint.
const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// The default model for OpenAI embeddings.
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// The default dimensionality for `text-embedding-3-small`.
const DEFAULT_DIMENSIONS: usize = 1536;

/// An [`EmbeddingProvider`] backed by an OpenAI-compatible embeddings API.
///
/// Uses `reqwest` to call the `/v1/embeddings` endpoint directly; any
/// server speaking the same wire shape (Ollama, vLLM, ...) works via
/// [`with_base_url`](OpenAiEmbedder::with_base_url).
///
/// # Example
///
/// ```rust,ignore
/// use docrag::openai::OpenAiEmbedder;
///
/// let embedder = OpenAiEmbedder::new("sk-...")?;
/// let embedding = embedder.embed("hello world").await?;
/// ```
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    /// Create a new embedder with the given API key.
    ///
    /// Uses the default model (`text-embedding-3-small`, 1536 dimensions).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmbeddingError`] if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::EmbeddingError {
                provider: "OpenAI".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: OPENAI_EMBEDDINGS_URL.into(),
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a new embedder using the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| RagError::EmbeddingError {
            provider: "OpenAI".into(),
            message: "OPENAI_API_KEY environment variable not set".into(),
        })?;
        Self::new(api_key)
    }

    /// Set the model name and its dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }

    /// Point the embedder at a different embeddings endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn request(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>> {
        debug!(model = %self.model, batch_size = inputs.len(), "embedding request");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingsRequest { model: &self.model, input: inputs })
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "embedding request failed");
                RagError::EmbeddingError { provider: "OpenAI".into(), message: e.to_string() }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "embedding request rejected");
            return Err(RagError::EmbeddingError {
                provider: "OpenAI".into(),
                message: format!("HTTP {status}: {body}"),
            });
        }

        let parsed: EmbeddingsResponse = response.json().await.map_err(|e| {
            RagError::EmbeddingError { provider: "OpenAI".into(), message: e.to_string() }
        })?;

        if parsed.data.len() != inputs.len() {
            return Err(RagError::EmbeddingError {
                provider: "OpenAI".into(),
                message: format!(
                    "expected {} embeddings, got {}",
                    inputs.len(),
                    parsed.data.len()
                ),
            });
        }

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.request(&[text]).await?;
        embeddings.pop().ok_or_else(|| RagError::EmbeddingError {
            provider: "OpenAI".into(),
            message: "empty embedding response".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
