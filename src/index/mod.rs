//! Cosine-similarity index over the fitted catalog
//!
//! The index pairs an ordered id list with an index-aligned vector
//! collection and the encoder that produced it, so queries are encoded
//! through the exact transformation used at fit time. Rebuilding replaces
//! the whole state: a `SimilarityIndex` is immutable once built.

#[cfg(feature = "ann")]
mod ann;

#[cfg(feature = "ann")]
use ann::AnnBackend;

use crate::encoder::{TextEncoder, Vector};
use crate::models::{Item, ScoredResult, rank_descending};
use crate::text::{self, TextField};
use crate::{RelevoError, Result};
use std::collections::HashMap;

/// Nearest-neighbor index keyed by item id.
pub struct SimilarityIndex {
    encoder: Box<dyn TextEncoder>,
    ids: Vec<String>,
    vectors: Vec<Vector>,
    positions: HashMap<String, usize>,
    #[cfg(feature = "ann")]
    ann: Option<AnnBackend>,
}

impl SimilarityIndex {
    /// Fit the encoder on the catalog and build the index.
    ///
    /// When `use_ann` is set, the `ann` feature is enabled and the encoder
    /// produces dense vectors, an approximate-neighbor structure is built
    /// from the exact same vectors used for brute-force scoring. In every
    /// other case queries fall back transparently to exact scoring.
    pub fn build(
        mut encoder: Box<dyn TextEncoder>,
        items: &[Item],
        text_fields: &[TextField],
        use_ann: bool,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(RelevoError::EmptyCorpus);
        }

        let documents: Vec<String> = items
            .iter()
            .map(|item| text::item_document(item, text_fields))
            .collect();
        encoder.fit(&documents)?;
        let vectors = encoder.encode(&documents)?;

        let ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();
        let positions: HashMap<String, usize> = ids
            .iter()
            .enumerate()
            .map(|(position, id)| (id.clone(), position))
            .collect();

        #[cfg(feature = "ann")]
        let ann = if use_ann {
            let backend = AnnBackend::build(&vectors);
            if backend.is_none() {
                tracing::debug!("approximate backend unavailable; queries use exact scoring");
            }
            backend
        } else {
            None
        };

        #[cfg(not(feature = "ann"))]
        if use_ann {
            tracing::debug!("'ann' feature not enabled; queries use exact scoring");
        }

        Ok(Self {
            encoder,
            ids,
            vectors,
            positions,
            #[cfg(feature = "ann")]
            ann,
        })
    }

    /// Number of indexed items
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the index holds no items
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether the given item id is indexed
    pub fn contains(&self, item_id: &str) -> bool {
        self.positions.contains_key(item_id)
    }

    /// The indexed item ids, in catalog order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Up to `k` items ranked by descending similarity to the query text.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredResult>> {
        let vector = self.encode_one(query)?;
        Ok(self.rank(&vector, k, None))
    }

    /// Up to `k` *other* items ranked by descending similarity to the
    /// given item.
    ///
    /// The item itself is excluded before the cut-off, so `k` distinct
    /// non-self results come back whenever at least `k` other items exist.
    pub fn similar_items(&self, item_id: &str, k: usize) -> Result<Vec<ScoredResult>> {
        let position = *self
            .positions
            .get(item_id)
            .ok_or_else(|| RelevoError::ItemNotFound {
                id: item_id.to_string(),
            })?;
        Ok(self.rank(&self.vectors[position], k, Some(position)))
    }

    /// Similarity of every indexed item to the given text.
    ///
    /// Used by the personalization scorer to rate candidates against a
    /// user profile document.
    pub fn text_scores(&self, profile: &str) -> Result<HashMap<String, f64>> {
        let vector = self.encode_one(profile)?;
        Ok(self
            .ids
            .iter()
            .zip(self.vectors.iter())
            .map(|(id, candidate)| (id.clone(), f64::from(vector.cosine(candidate))))
            .collect())
    }

    fn encode_one(&self, query: &str) -> Result<Vector> {
        self.encoder
            .encode(std::slice::from_ref(&query.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| RelevoError::Provider("encoder returned no vector".to_string()))
    }

    /// Rank all candidates against a query vector, excluding at most one
    /// position (the query item itself), sorted by descending score with
    /// ties broken by ascending id, truncated to `k`.
    fn rank(&self, query: &Vector, k: usize, exclude: Option<usize>) -> Vec<ScoredResult> {
        #[cfg(feature = "ann")]
        if let (Some(backend), Some(dense)) = (&self.ann, query.as_dense()) {
            let want = k.saturating_add(usize::from(exclude.is_some()));
            let mut results: Vec<ScoredResult> = backend
                .search(dense, want)
                .into_iter()
                .filter(|position| Some(*position) != exclude)
                .map(|position| {
                    ScoredResult::new(
                        self.ids[position].clone(),
                        f64::from(query.cosine(&self.vectors[position])),
                    )
                })
                .collect();
            rank_descending(&mut results);
            results.truncate(k);
            return results;
        }

        let mut results: Vec<ScoredResult> = self
            .ids
            .iter()
            .zip(self.vectors.iter())
            .enumerate()
            .filter(|(position, _)| Some(*position) != exclude)
            .map(|(_, (id, candidate))| {
                ScoredResult::new(id.clone(), f64::from(query.cosine(candidate)))
            })
            .collect();
        rank_descending(&mut results);
        results.truncate(k);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{EncoderConfig, build_encoder};

    fn catalog() -> Vec<Item> {
        vec![
            Item::new("1", "Modern Gray Sofa", "3-seater couch with linen fabric", "furniture", 499.0),
            Item::new("2", "Leather Couch", "Spacious brown sofa, premium leather", "furniture", 899.0),
            Item::new("3", "Office Chair", "Ergonomic mesh chair with lumbar support", "furniture", 199.0),
            Item::new("4", "iPhone 14", "128GB, midnight, excellent condition", "electronics", 699.0),
            Item::new("5", "Samsung Galaxy S23", "256GB, black, near-mint", "electronics", 749.0),
        ]
    }

    fn build_index(items: &[Item]) -> SimilarityIndex {
        let config = EncoderConfig::default();
        SimilarityIndex::build(
            build_encoder(&config, None),
            items,
            &config.text_fields,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_build_on_empty_catalog_fails() {
        let config = EncoderConfig::default();
        let result =
            SimilarityIndex::build(build_encoder(&config, None), &[], &config.text_fields, false);
        assert!(matches!(result, Err(RelevoError::EmptyCorpus)));
    }

    #[test]
    fn test_search_ranks_matching_items_first() {
        let index = build_index(&catalog());
        let results = index.search("sofa", 2).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.item_id.as_str()).collect();
        assert!(ids.contains(&"1"));
        assert!(ids.contains(&"2"));
    }

    #[test]
    fn test_search_scores_are_non_increasing() {
        let index = build_index(&catalog());
        let results = index.search("sofa couch chair", 5).unwrap();
        assert_eq!(results.len(), 5);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_similar_items_never_returns_self() {
        let index = build_index(&catalog());
        for item in catalog() {
            for k in 1..=5 {
                let results = index.similar_items(&item.id, k).unwrap();
                assert!(results.iter().all(|r| r.item_id != item.id));
            }
        }
    }

    #[test]
    fn test_self_exclusion_happens_before_cutoff() {
        // With 5 items, k=4 must return all four non-self items even
        // though the item itself would rank highest.
        let index = build_index(&catalog());
        let results = index.similar_items("1", 4).unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.item_id != "1"));
    }

    #[test]
    fn test_unknown_item_fails() {
        let index = build_index(&catalog());
        let result = index.similar_items("nope", 3);
        assert!(matches!(result, Err(RelevoError::ItemNotFound { id }) if id == "nope"));
    }

    #[test]
    fn test_output_length_is_min_of_k_and_candidates() {
        let index = build_index(&catalog());
        assert_eq!(index.search("sofa", 100).unwrap().len(), 5);
        assert_eq!(index.search("sofa", 0).unwrap().len(), 0);
        assert_eq!(index.similar_items("1", 100).unwrap().len(), 4);
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        // Two items with identical text score identically against any
        // query; the lower id must come first.
        let items = vec![
            Item::new("b", "red lamp", "warm light", "lighting", 10.0),
            Item::new("a", "red lamp", "warm light", "lighting", 20.0),
            Item::new("c", "blue rug", "soft wool", "textile", 30.0),
        ];
        let index = build_index(&items);
        let results = index.search("red lamp", 3).unwrap();
        assert_eq!(results[0].item_id, "a");
        assert_eq!(results[1].item_id, "b");
        assert!((results[0].score - results[1].score).abs() < 1e-9);
    }

    #[test]
    fn test_text_scores_covers_every_item() {
        let index = build_index(&catalog());
        let scores = index.text_scores("spacious leather sofa").unwrap();
        assert_eq!(scores.len(), 5);
        assert!(scores["2"] > scores["4"]);
    }

    #[test]
    fn test_repeated_queries_are_reproducible() {
        let index = build_index(&catalog());
        let first = index.search("sofa couch", 5).unwrap();
        let second = index.search("sofa couch", 5).unwrap();
        assert_eq!(first, second);
    }
}
