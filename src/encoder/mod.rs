//! Vector encoders for catalog text
//!
//! Two interchangeable strategies share the [`TextEncoder`] contract: a
//! corpus-relative term-weighted encoder ([`TfidfEncoder`]) and a
//! model-relative embedding encoder ([`EmbeddingEncoder`]). Callers select a
//! strategy at construction time via [`EncoderMethod`] and never branch on
//! the method afterwards.

mod embedding;
mod tfidf;

pub use embedding::{EmbeddingEncoder, EmbeddingProvider, HashEmbedder};
pub use tfidf::TfidfEncoder;

use crate::text::TextField;
use crate::{Result, text};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A fixed representation of one piece of text.
///
/// Both variants are unit-normalized at creation, so cosine similarity
/// reduces to a dot product. All vectors built in the same fit share one
/// dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub enum Vector {
    /// Sparse term-weighted vector keyed by vocabulary index
    Sparse(HashMap<u32, f32>),

    /// Dense fixed-length embedding
    Dense(Vec<f32>),
}

impl Vector {
    /// Build a sparse vector, normalizing it to unit length.
    pub fn sparse(mut weights: HashMap<u32, f32>) -> Self {
        let norm = weights.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for weight in weights.values_mut() {
                *weight /= norm;
            }
        }
        Self::Sparse(weights)
    }

    /// Build a dense vector, normalizing it to unit length.
    pub fn dense(mut values: Vec<f32>) -> Self {
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut values {
                *value /= norm;
            }
        }
        Self::Dense(values)
    }

    /// Cosine similarity to another vector.
    ///
    /// Vectors are unit-normalized at creation, so this is a dot product.
    /// Mismatched representations (one sparse, one dense) score 0.0; they
    /// cannot come from the same fit.
    pub fn cosine(&self, other: &Vector) -> f32 {
        match (self, other) {
            (Self::Sparse(a), Self::Sparse(b)) => {
                let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
                small
                    .iter()
                    .filter_map(|(index, weight)| large.get(index).map(|w| weight * w))
                    .sum()
            }
            (Self::Dense(a), Self::Dense(b)) => {
                a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
            }
            _ => 0.0,
        }
    }

    /// The dense values, if this is a dense vector.
    pub fn as_dense(&self) -> Option<&[f32]> {
        match self {
            Self::Dense(values) => Some(values),
            Self::Sparse(_) => None,
        }
    }
}

/// Interface shared by all encoding strategies.
///
/// The lifecycle is two-phase: `fit` consumes the full catalog text and
/// builds a reusable transformation; `encode` then maps ordered texts to
/// vectors of fixed dimensionality. `encode` before the first successful
/// `fit` fails with `RelevoError::NotFitted`.
pub trait TextEncoder: Send + Sync {
    /// Build the transformation from the full catalog text.
    ///
    /// Fails with `RelevoError::EmptyCorpus` when the corpus is empty.
    fn fit(&mut self, corpus: &[String]) -> Result<()>;

    /// Map an ordered sequence of texts to vectors.
    fn encode(&self, texts: &[String]) -> Result<Vec<Vector>>;

    /// Whether `fit` has completed successfully.
    fn is_fitted(&self) -> bool;

    /// Dimensionality of the fitted transformation, if fitted.
    fn dimension(&self) -> Option<usize>;
}

/// Encoding strategy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderMethod {
    /// Corpus-relative term weighting (unigrams + bigrams)
    #[default]
    Tfidf,

    /// Dense embeddings from an [`EmbeddingProvider`]
    Embedding,
}

impl fmt::Display for EncoderMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tfidf => write!(f, "tfidf"),
            Self::Embedding => write!(f, "embedding"),
        }
    }
}

impl FromStr for EncoderMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tfidf" => Ok(Self::Tfidf),
            "embedding" => Ok(Self::Embedding),
            _ => Err(format!(
                "Unknown encoder method '{}'. Supported methods: 'tfidf', 'embedding'",
                s
            )),
        }
    }
}

/// Configuration for the vector encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Encoding strategy
    pub method: EncoderMethod,

    /// Item fields concatenated into the encoded document
    pub text_fields: Vec<TextField>,

    /// Vocabulary ceiling for the term-weighted encoder.
    ///
    /// Bounds memory on large catalogs; the most frequent units win.
    pub max_features: usize,

    /// Include adjacent-word pairs as vocabulary units
    pub bigrams: bool,

    /// Dimension for the built-in hashing embedder (ignored when a custom
    /// provider is supplied)
    pub embedding_dimension: usize,

    /// Attach an approximate-neighbor structure after fitting when the
    /// `ann` feature is enabled and the vectors are dense
    pub use_ann: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            method: EncoderMethod::Tfidf,
            text_fields: vec![TextField::Title, TextField::Description],
            max_features: 100_000,
            bigrams: true,
            embedding_dimension: 384,
            use_ann: true,
        }
    }
}

impl EncoderConfig {
    /// Validate the configuration, returning an error if invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.text_fields.is_empty() {
            return Err("text_fields must name at least one field".to_string());
        }
        if self.max_features == 0 {
            return Err("max_features must be greater than 0".to_string());
        }
        if self.embedding_dimension == 0 {
            return Err("embedding_dimension must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Construct the encoder selected by the configuration.
///
/// For the embedding method, `provider` overrides the built-in
/// [`HashEmbedder`] (BYOE).
pub(crate) fn build_encoder(
    config: &EncoderConfig,
    provider: Option<Arc<dyn EmbeddingProvider>>,
) -> Box<dyn TextEncoder> {
    match config.method {
        EncoderMethod::Tfidf => {
            Box::new(TfidfEncoder::new(config.max_features, config.bigrams))
        }
        EncoderMethod::Embedding => {
            let provider = provider
                .unwrap_or_else(|| Arc::new(HashEmbedder::new(config.embedding_dimension)));
            Box::new(EmbeddingEncoder::new(provider))
        }
    }
}

/// Normalize query or profile text exactly like catalog documents.
pub(crate) fn normalize_texts(texts: &[String]) -> Vec<String> {
    texts.iter().map(|t| text::normalize(t)).collect()
}
