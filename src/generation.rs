//! Generation model capability and prompt construction.

use async_trait::async_trait;

use crate::error::Result;

/// A text generation model.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a response for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build the generation prompt from an assembled context and a query.
pub fn build_prompt(context: &str, query: &str) -> String {
    format!("Context: {context}\n\nQuestion: {query}\n\nAnswer:")
}
