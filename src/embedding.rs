//! Embedding provider seam.
//!
//! Computing embeddings is the job of an external service. The indexing
//! pipeline only needs something that turns a batch of texts into one
//! vector per text; [`EmbeddingProvider`] is that contract. Pacing, retry
//! and rate limiting belong to the implementation.

use anyhow::Result;
use async_trait::async_trait;

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier (e.g. `"text-embedding-3-small"`).
    fn model_name(&self) -> &str;
    /// Returns the embedding vector dimensionality (e.g. `1536`).
    fn dims(&self) -> usize;
    /// Embed a batch of texts, returning vectors in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
