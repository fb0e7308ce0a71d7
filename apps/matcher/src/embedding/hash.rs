//! Hash embeddings — FNV-1a feature hashing of word tokens.
//!
//! No model dependency and fully deterministic, so it doubles as the offline
//! backend and the fake used by ranking tests. Texts sharing words land close
//! together; it has no notion of synonyms.

use async_trait::async_trait;
use unicode_segmentation::UnicodeSegmentation;

use super::{EmbeddingError, EmbeddingVector, Embedder};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

pub const DEFAULT_DIMENSION: usize = 384;

pub struct HashEmbedder {
    dim: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            dim: DEFAULT_DIMENSION,
        }
    }
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    /// Synchronous core of `embed`; the vector is L2-normalized unless the text has no words.
    pub fn embed_sync(&self, text: &str) -> EmbeddingVector {
        let mut vector = vec![0.0_f32; self.dim];

        for word in text.unicode_words() {
            let hash = fnv1a(word.to_lowercase().as_bytes());
            let bucket = (hash % self.dim as u64) as usize;
            // High bit picks the sign so unrelated words cancel instead of piling up.
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }

        EmbeddingVector::new(vector)
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        Ok(self.embed_sync(text))
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn name(&self) -> &str {
        "hash"
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::cosine_similarity;
    use proptest::prelude::*;

    #[test]
    fn test_fnv1a_known_vector() {
        // Reference value for FNV-1a 64 of "a".
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let v = HashEmbedder::new(16).embed_sync("");
        assert!(v.as_slice().iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_case_insensitive() {
        let embedder = HashEmbedder::new(64);
        assert_eq!(
            embedder.embed_sync("Rust Docker"),
            embedder.embed_sync("rust docker")
        );
    }

    #[test]
    fn test_shared_words_are_more_similar() {
        let embedder = HashEmbedder::default();
        let resume = embedder.embed_sync("python developer docker aws");
        let close = embedder.embed_sync("python developer docker");
        let far = embedder.embed_sync("registered nurse hospital ward");
        let close_sim = cosine_similarity(resume.as_slice(), close.as_slice());
        let far_sim = cosine_similarity(resume.as_slice(), far.as_slice());
        assert!(close_sim > far_sim, "{close_sim} <= {far_sim}");
    }

    #[tokio::test]
    async fn test_trait_reports_dimension_and_name() {
        let embedder = HashEmbedder::new(32);
        let v = embedder.embed("hello world").await.unwrap();
        assert_eq!(v.dimension(), 32);
        assert_eq!(embedder.dimension(), 32);
        assert_eq!(embedder.name(), "hash");
    }

    proptest! {
        #[test]
        fn prop_hash_embedding_deterministic(text in ".*") {
            let embedder = HashEmbedder::new(64);
            prop_assert_eq!(embedder.embed_sync(&text), embedder.embed_sync(&text));
        }

        #[test]
        fn prop_hash_embedding_length(text in ".*", dim in 1usize..256usize) {
            let embedder = HashEmbedder::new(dim);
            prop_assert_eq!(embedder.embed_sync(&text).dimension(), dim);
        }
    }
}
