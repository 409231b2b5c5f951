//! Term-weighted (tf-idf) encoder
//!
//! Corpus-relative sparse vectors: common terms are downweighted, rare
//! discriminative terms upweighted. Vocabulary units are single words plus
//! adjacent-word pairs, capped at a configurable ceiling to bound memory.

use super::{TextEncoder, Vector};
use crate::{RelevoError, Result};
use std::collections::{HashMap, HashSet};

/// Term-weighted encoder over unigrams and adjacent-word bigrams.
///
/// Inverse document frequency is smoothed (`ln((1+n)/(1+df)) + 1`) and
/// per-document vectors are L2-normalized, so cosine similarity against
/// other vectors from the same fit is a plain dot product.
pub struct TfidfEncoder {
    max_features: usize,
    bigrams: bool,
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
    fitted: bool,
}

impl TfidfEncoder {
    /// Create an unfitted encoder.
    ///
    /// `max_features` caps the vocabulary (most frequent units win); the
    /// default ceiling used by the stock configuration is 100 000 units.
    pub fn new(max_features: usize, bigrams: bool) -> Self {
        Self {
            max_features,
            bigrams,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            fitted: false,
        }
    }

    /// Lowercase alphanumeric tokens of length >= 2.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= 2)
            .map(|token| token.to_lowercase())
            .collect()
    }

    /// Vocabulary units for one document: unigrams, plus bigrams when
    /// enabled.
    fn units(&self, text: &str) -> Vec<String> {
        let tokens = Self::tokenize(text);
        let mut units = tokens.clone();
        if self.bigrams {
            for pair in tokens.windows(2) {
                units.push(format!("{} {}", pair[0], pair[1]));
            }
        }
        units
    }
}

impl TextEncoder for TfidfEncoder {
    fn fit(&mut self, corpus: &[String]) -> Result<()> {
        if corpus.is_empty() {
            return Err(RelevoError::EmptyCorpus);
        }

        // Document frequency and total occurrence count per unit
        let mut document_frequency: HashMap<String, u32> = HashMap::new();
        let mut occurrences: HashMap<String, u64> = HashMap::new();
        for document in corpus {
            let units = self.units(document);
            for unit in &units {
                *occurrences.entry(unit.clone()).or_insert(0) += 1;
            }
            let distinct: HashSet<&String> = units.iter().collect();
            for unit in distinct {
                *document_frequency.entry(unit.clone()).or_insert(0) += 1;
            }
        }

        // Cap the vocabulary at max_features, keeping the most frequent
        // units; ties break lexicographically so fits are reproducible.
        let mut selected: Vec<(String, u64)> = occurrences.into_iter().collect();
        selected.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        selected.truncate(self.max_features);

        let mut units: Vec<String> = selected.into_iter().map(|(unit, _)| unit).collect();
        units.sort();

        let total_documents = corpus.len() as f32;
        self.vocabulary = HashMap::with_capacity(units.len());
        self.idf = Vec::with_capacity(units.len());
        for (index, unit) in units.into_iter().enumerate() {
            let df = document_frequency.get(&unit).copied().unwrap_or(0) as f32;
            self.idf
                .push(((1.0 + total_documents) / (1.0 + df)).ln() + 1.0);
            self.vocabulary.insert(unit, index as u32);
        }
        self.fitted = true;

        tracing::debug!(
            vocabulary = self.vocabulary.len(),
            documents = corpus.len(),
            "fitted term-weighted encoder"
        );
        Ok(())
    }

    fn encode(&self, texts: &[String]) -> Result<Vec<Vector>> {
        if !self.fitted {
            return Err(RelevoError::NotFitted);
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            let mut term_frequency: HashMap<u32, f32> = HashMap::new();
            for unit in self.units(text) {
                if let Some(&index) = self.vocabulary.get(&unit) {
                    *term_frequency.entry(index).or_insert(0.0) += 1.0;
                }
            }
            for (index, weight) in term_frequency.iter_mut() {
                *weight *= self.idf[*index as usize];
            }
            vectors.push(Vector::sparse(term_frequency));
        }
        Ok(vectors)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn dimension(&self) -> Option<usize> {
        self.fitted.then(|| self.vocabulary.len())
    }
}
