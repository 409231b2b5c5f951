//! Personalized feed scoring
//!
//! Blends three affinity signals per candidate (category, price and
//! content) into one ranked list for a user history. Weights are
//! independent and configurable; callers may over- or under-weight
//! deliberately, so no normalization of weights is enforced.

use crate::index::SimilarityIndex;
use crate::models::{Item, ScoredResult, rank_descending};
use crate::text::{self, TextField};
use crate::{RelevoError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Blend weights for the personalized feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Weight of category affinity (history category frequency)
    pub category_weight: f64,

    /// Weight of price affinity (closeness to the history median price)
    pub price_weight: f64,

    /// Weight of content affinity (similarity to the history profile text)
    pub content_weight: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            category_weight: 0.4,
            price_weight: 0.2,
            content_weight: 0.4,
        }
    }
}

impl FeedConfig {
    /// Validate the configuration, returning an error if invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, weight) in [
            ("category_weight", self.category_weight),
            ("price_weight", self.price_weight),
            ("content_weight", self.content_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!("{} must be a finite value >= 0.0", name));
            }
        }
        Ok(())
    }
}

/// Min-max scaler fit once over the catalog price range.
///
/// Fitting once (not per query) keeps price scores comparable across
/// calls. A degenerate range (all prices equal) maps every input to 0.
#[derive(Debug, Clone, Copy)]
struct MinMaxScaler {
    min: f64,
    range: f64,
}

impl MinMaxScaler {
    fn fit(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            min,
            range: max - min,
        }
    }

    fn transform(&self, value: f64) -> f64 {
        if self.range > 0.0 {
            (value - self.min) / self.range
        } else {
            0.0
        }
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Content-based personalization scorer.
pub struct PersonalizedFeed {
    config: FeedConfig,
    scaler: Option<MinMaxScaler>,
}

impl PersonalizedFeed {
    /// Create an unfitted scorer
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            scaler: None,
        }
    }

    /// Fit the price scaler over the full catalog.
    pub fn fit(&mut self, items: &[Item]) -> Result<()> {
        if items.is_empty() {
            return Err(RelevoError::EmptyCorpus);
        }
        let prices: Vec<f64> = items.iter().map(|item| item.price).collect();
        self.scaler = Some(MinMaxScaler::fit(&prices));
        Ok(())
    }

    /// Whether `fit` has completed successfully
    pub fn is_fitted(&self) -> bool {
        self.scaler.is_some()
    }

    /// Rank candidates for a user history.
    ///
    /// With `exclude_seen`, history items are removed from the candidate
    /// pool before scoring. An empty history zeroes the category and
    /// content signals and targets the candidate pool's own median price,
    /// so ranking degenerates to price affinity alone.
    pub fn recommend(
        &self,
        history: &[&Item],
        candidates: &[&Item],
        index: &SimilarityIndex,
        text_fields: &[TextField],
        k: usize,
        exclude_seen: bool,
    ) -> Result<Vec<ScoredResult>> {
        let scaler = self.scaler.ok_or(RelevoError::NotFitted)?;

        let seen: HashSet<&str> = history.iter().map(|item| item.id.as_str()).collect();
        let pool: Vec<&Item> = candidates
            .iter()
            .filter(|candidate| !exclude_seen || !seen.contains(candidate.id.as_str()))
            .copied()
            .collect();
        if pool.is_empty() {
            return Ok(Vec::new());
        }

        // Category affinity: empirical frequency within the history
        let mut category_frequency: HashMap<&str, f64> = HashMap::new();
        for item in history {
            *category_frequency.entry(item.category.as_str()).or_insert(0.0) += 1.0;
        }
        for frequency in category_frequency.values_mut() {
            *frequency /= history.len() as f64;
        }

        // Price affinity target: history median, or the pool's own median
        // when the history carries no price signal
        let target_price = if history.is_empty() {
            median(pool.iter().map(|item| item.price).collect())
        } else {
            median(history.iter().map(|item| item.price).collect())
        };
        let target = scaler.transform(target_price);

        // Content affinity: one aggregate profile vector over the history
        let content_scores = if history.is_empty() {
            None
        } else {
            let profile = text::profile_document(history, text_fields);
            Some(index.text_scores(&profile)?)
        };

        let mut results: Vec<ScoredResult> = pool
            .iter()
            .map(|candidate| {
                let category = category_frequency
                    .get(candidate.category.as_str())
                    .copied()
                    .unwrap_or(0.0);
                let price = 1.0 - (scaler.transform(candidate.price) - target).abs().min(1.0);
                let content = content_scores
                    .as_ref()
                    .and_then(|scores| scores.get(&candidate.id).copied())
                    .unwrap_or(0.0);
                let score = self.config.category_weight * category
                    + self.config.price_weight * price
                    + self.config.content_weight * content;
                ScoredResult::new(candidate.id.clone(), score)
            })
            .collect();
        rank_descending(&mut results);
        results.truncate(k);
        Ok(results)
    }
}
