//! Embedding capability — the pluggable text → dense vector seam.
//!
//! `AppState` carries an `Arc<dyn Embedder>` chosen at startup from config:
//! `HttpEmbedder` (OpenAI-compatible endpoint) or `HashEmbedder` (offline).

pub mod hash;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use hash::HashEmbedder;
pub use http::HttpEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding service unavailable after {retries} retries")]
    RetriesExhausted { retries: u32 },

    #[error("Embedding service returned no vectors")]
    EmptyResponse,

    #[error("Expected {expected} embeddings, received {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("Expected embedding dimension {expected}, received {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Embedding contains NaN or infinite values")]
    NonFinite,
}

/// A fixed-dimension dense vector. Opaque to the ranking core beyond cosine similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }
}

/// Text embedding capability. Implementations must be safe to share across
/// concurrent requests.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError>;

    /// Embeds several texts, returning one vector per input in input order.
    ///
    /// The default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    fn dimension(&self) -> usize;

    /// Backend label surfaced in logs and `/health`.
    fn name(&self) -> &str;
}

/// Cosine similarity between two vectors, nominally in `[-1, 1]`.
///
/// Returns 0.0 for empty or zero-norm inputs. Accumulates in f64.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    debug_assert_eq!(a.len(), b.len(), "embedding dimensions must match");

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_have_similarity_one() {
        let v = [0.3, -0.2, 0.9];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_opposite_vectors_have_similarity_minus_one() {
        let a = [1.0, 2.0];
        let b = [-1.0, -2.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors_have_similarity_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_zero_vector_yields_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_embedding_vector_serializes_as_plain_array() {
        let v = EmbeddingVector::new(vec![0.5, 1.0]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.5,1.0]");
    }
}
