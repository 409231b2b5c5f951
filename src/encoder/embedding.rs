//! Embedding-based encoder (BYOE, Bring Your Own Embeddings)
//!
//! The encoder delegates to a pluggable [`EmbeddingProvider`], keeping the
//! ranking core model-agnostic: wrap an API client, a local model server, or
//! use the built-in [`HashEmbedder`] which needs no model at all.

use super::{TextEncoder, Vector, normalize_texts};
use crate::{RelevoError, Result};
use std::sync::Arc;

/// A source of dense semantic vectors.
///
/// Providers receive already-normalized (trimmed, lowercased) texts and
/// return one vector per text, in order, all of `dimension()` length.
/// Returned vectors need not be unit length; the encoder normalizes them
/// at vector creation.
pub trait EmbeddingProvider: Send + Sync {
    /// Length of the vectors this provider produces
    fn dimension(&self) -> usize;

    /// Embed a batch of texts
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Dependency-free default provider: character n-gram feature hashing.
///
/// Deterministic and fast, with no model download or network call. Texts
/// sharing character trigrams land in the same buckets, which approximates
/// lexical similarity well enough for small catalogs and tests; supply a
/// real model through [`EmbeddingProvider`] for semantic quality.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

const NGRAM_LEN: usize = 3;

impl HashEmbedder {
    /// Create a hashing embedder with the given output dimension
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

fn hash_bytes(bytes: &[u8]) -> u32 {
    let mut hash = 0u32;
    for &b in bytes {
        hash = hash.wrapping_mul(31).wrapping_add(b as u32);
    }
    hash
}

impl EmbeddingProvider for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            let mut vector = vec![0.0f32; self.dimension];
            let bytes = text.as_bytes();
            if bytes.is_empty() {
                vectors.push(vector);
                continue;
            }
            if bytes.len() < NGRAM_LEN {
                let index = hash_bytes(bytes) % self.dimension as u32;
                vector[index as usize] += 1.0;
            } else {
                for window in bytes.windows(NGRAM_LEN) {
                    let index = hash_bytes(window) % self.dimension as u32;
                    vector[index as usize] += 1.0;
                }
            }
            vectors.push(vector);
        }
        Ok(vectors)
    }
}

/// Encoder that delegates to a pretrained [`EmbeddingProvider`].
///
/// A pretrained model carries no corpus-relative state, so `fit` only
/// validates the catalog and records readiness; all vectors are
/// unit-normalized at creation so cosine similarity is a dot product.
pub struct EmbeddingEncoder {
    provider: Arc<dyn EmbeddingProvider>,
    fitted: bool,
}

impl EmbeddingEncoder {
    /// Create an unfitted encoder around a provider
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            fitted: false,
        }
    }
}

impl TextEncoder for EmbeddingEncoder {
    fn fit(&mut self, corpus: &[String]) -> Result<()> {
        if corpus.is_empty() {
            return Err(RelevoError::EmptyCorpus);
        }
        self.fitted = true;
        tracing::debug!(
            dimension = self.provider.dimension(),
            documents = corpus.len(),
            "fitted embedding encoder"
        );
        Ok(())
    }

    fn encode(&self, texts: &[String]) -> Result<Vec<Vector>> {
        if !self.fitted {
            return Err(RelevoError::NotFitted);
        }
        let normalized = normalize_texts(texts);
        let embedded = self.provider.embed(&normalized)?;
        Ok(embedded.into_iter().map(Vector::dense).collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn dimension(&self) -> Option<usize> {
        self.fitted.then(|| self.provider.dimension())
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockProvider;
    use super::*;

    fn is_unit(vector: &Vector) -> bool {
        let Vector::Dense(values) = vector else {
            return false;
        };
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        (norm - 1.0).abs() < 1e-5
    }

    #[test]
    fn test_encode_before_fit_fails() {
        let encoder = EmbeddingEncoder::new(Arc::new(MockProvider::new(16)));
        let result = encoder.encode(&["hello".to_string()]);
        assert!(matches!(result, Err(RelevoError::NotFitted)));
    }

    #[test]
    fn test_fit_on_empty_corpus_fails() {
        let mut encoder = EmbeddingEncoder::new(Arc::new(MockProvider::new(16)));
        assert!(matches!(encoder.fit(&[]), Err(RelevoError::EmptyCorpus)));
    }

    #[test]
    fn test_vectors_are_unit_normalized_and_dense() {
        let mut encoder = EmbeddingEncoder::new(Arc::new(MockProvider::new(16)));
        encoder.fit(&["anything".to_string()]).unwrap();
        let vectors = encoder
            .encode(&["first text".to_string(), "second text".to_string()])
            .unwrap();
        assert_eq!(vectors.len(), 2);
        assert!(vectors.iter().all(is_unit));
        assert_eq!(encoder.dimension(), Some(16));
    }

    #[test]
    fn test_input_is_normalized_before_embedding() {
        let mut encoder = EmbeddingEncoder::new(Arc::new(MockProvider::new(16)));
        encoder.fit(&["anything".to_string()]).unwrap();
        let a = encoder.encode(&["  Gray Sofa  ".to_string()]).unwrap();
        let b = encoder.encode(&["gray sofa".to_string()]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_embedder_is_deterministic() {
        let embedder = HashEmbedder::new(128);
        let a = embedder.embed(&["gray sofa".to_string()]).unwrap();
        let b = embedder.embed(&["gray sofa".to_string()]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_embedder_scores_shared_substrings() {
        let mut encoder = EmbeddingEncoder::new(Arc::new(HashEmbedder::new(512)));
        encoder.fit(&["anything".to_string()]).unwrap();
        let vectors = encoder
            .encode(&[
                "sofa".to_string(),
                "modern gray sofa".to_string(),
                "128gb midnight phone".to_string(),
            ])
            .unwrap();
        let to_sofa = vectors[0].cosine(&vectors[1]);
        let to_phone = vectors[0].cosine(&vectors[2]);
        assert!(to_sofa > to_phone);
    }

    #[test]
    fn test_hash_embedder_handles_short_and_empty_text() {
        let embedder = HashEmbedder::new(32);
        let vectors = embedder
            .embed(&["".to_string(), "ab".to_string()])
            .unwrap();
        assert!(vectors[0].iter().all(|v| *v == 0.0));
        assert_eq!(vectors[1].iter().filter(|v| **v > 0.0).count(), 1);
    }
}
