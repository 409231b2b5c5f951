//! Recommender facade
//!
//! This module ties the scoring components together behind the interface
//! exposed to collaborators (e.g. an HTTP layer): `search`, `similar`,
//! `feed` and `trending`, each returning a plain sorted list of
//! `(item_id, score)` results.
//!
//! # Index lifecycle
//!
//! `fit` builds a complete new generation (encoder, similarity index and
//! personalization scaler) off to the side, then atomically swaps the
//! active pointer. In-flight queries always observe one fully-consistent
//! generation; a failed fit leaves the previous generation untouched.
//! There is no incremental update: any catalog change requires a full
//! `fit`.

use crate::config::RelevoConfig;
use crate::encoder::{EmbeddingProvider, build_encoder};
use crate::index::SimilarityIndex;
use crate::models::{Event, Item, ScoredResult};
use crate::personalize::PersonalizedFeed;
use crate::trending::TrendingRanker;
use crate::{RelevoError, Result};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// One fully-built index generation.
struct Generation {
    items: Vec<Item>,
    index: SimilarityIndex,
    feed: PersonalizedFeed,
}

/// Catalog ranking engine.
///
/// # Examples
///
/// ```rust
/// use relevo::prelude::*;
///
/// fn example() -> relevo::Result<()> {
///     let engine = Recommender::builder().build()?;
///     engine.fit(vec![
///         Item::new("1", "Gray Sofa", "linen 3-seater", "furniture", 499.0),
///         Item::new("2", "Office Chair", "mesh back", "furniture", 199.0),
///     ])?;
///     let hits = engine.search("sofa", 5)?;
///     assert_eq!(hits[0].item_id, "1");
///     Ok(())
/// }
/// ```
pub struct Recommender {
    config: RelevoConfig,
    provider: Option<Arc<dyn EmbeddingProvider>>,
    trending: TrendingRanker,
    generation: RwLock<Option<Arc<Generation>>>,
}

impl Recommender {
    /// Create an unfitted engine from a configuration
    pub fn new(config: RelevoConfig) -> Result<Self> {
        crate::config::validate_config(&config)?;
        let trending =
            TrendingRanker::try_new(config.trending.clone()).map_err(RelevoError::Configuration)?;
        Ok(Self {
            config,
            provider: None,
            trending,
            generation: RwLock::new(None),
        })
    }

    /// Create an unfitted engine with a custom embedding provider (BYOE).
    ///
    /// The provider is used when the configured encoder method is
    /// `embedding`; it replaces the built-in hashing embedder.
    pub fn with_provider(
        config: RelevoConfig,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let mut engine = Self::new(config)?;
        engine.provider = Some(provider);
        Ok(engine)
    }

    /// Create a builder for custom configuration
    pub fn builder() -> RecommenderBuilder {
        RecommenderBuilder::new()
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &RelevoConfig {
        &self.config
    }

    /// Whether at least one fit has completed successfully
    pub fn is_fitted(&self) -> bool {
        self.generation.read().is_some()
    }

    /// Fit the engine on the full catalog, replacing any active index.
    ///
    /// The new generation is built entirely off to the side; queries keep
    /// serving the previous generation until the atomic swap.
    pub fn fit(&self, items: Vec<Item>) -> Result<()> {
        let encoder = build_encoder(&self.config.encoder, self.provider.clone());
        let index = SimilarityIndex::build(
            encoder,
            &items,
            &self.config.encoder.text_fields,
            self.config.encoder.use_ann,
        )?;
        let mut feed = PersonalizedFeed::new(self.config.feed.clone());
        feed.fit(&items)?;

        let count = items.len();
        let next = Arc::new(Generation { items, index, feed });
        *self.generation.write() = Some(next);
        tracing::info!(
            items = count,
            method = %self.config.encoder.method,
            "catalog indexed"
        );
        Ok(())
    }

    fn generation(&self) -> Result<Arc<Generation>> {
        self.generation.read().clone().ok_or(RelevoError::NotFitted)
    }

    /// Free-text search: up to `k` items by descending relevance.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredResult>> {
        self.generation()?.index.search(query, k)
    }

    /// Item-to-item similarity: up to `k` other items by descending
    /// similarity. Fails with `ItemNotFound` for unknown ids.
    pub fn similar(&self, item_id: &str, k: usize) -> Result<Vec<ScoredResult>> {
        self.generation()?.index.similar_items(item_id, k)
    }

    /// Personalized feed for a user history, excluding already-seen items.
    ///
    /// History ids absent from the catalog are ignored.
    pub fn feed(&self, history_ids: &[String], k: usize) -> Result<Vec<ScoredResult>> {
        self.feed_with_options(history_ids, k, true)
    }

    /// Personalized feed with explicit control over seen-item exclusion.
    pub fn feed_with_options(
        &self,
        history_ids: &[String],
        k: usize,
        exclude_seen: bool,
    ) -> Result<Vec<ScoredResult>> {
        let generation = self.generation()?;
        let wanted: HashSet<&str> = history_ids.iter().map(String::as_str).collect();
        let history: Vec<&Item> = generation
            .items
            .iter()
            .filter(|item| wanted.contains(item.id.as_str()))
            .collect();
        let candidates: Vec<&Item> = generation.items.iter().collect();
        generation.feed.recommend(
            &history,
            &candidates,
            &generation.index,
            &self.config.encoder.text_fields,
            k,
            exclude_seen,
        )
    }

    /// Trend scores for an event batch, as of now.
    pub fn trending(&self, events: &[Event]) -> Result<Vec<ScoredResult>> {
        self.trending_as_of(events, Utc::now().timestamp() as f64)
    }

    /// Trend scores for an event batch, as of an explicit timestamp
    /// (seconds since the Unix epoch).
    pub fn trending_as_of(&self, events: &[Event], as_of: f64) -> Result<Vec<ScoredResult>> {
        // Scoring queries are only valid once the engine has been fitted,
        // even though trending reads no index state.
        self.generation()?;
        Ok(self.trending.score(events, as_of))
    }
}

/// Builder for a [`Recommender`] with custom configuration.
///
/// # Examples
///
/// ```rust
/// use relevo::prelude::*;
///
/// fn example() -> relevo::Result<()> {
///     let engine = Recommender::builder()
///         .with_encoder_method(EncoderMethod::Tfidf)
///         .with_feed_weights(0.5, 0.1, 0.4)
///         .with_half_life_hours(12.0)
///         .build()?;
///     Ok(())
/// }
/// ```
pub struct RecommenderBuilder {
    builder: crate::config::ConfigBuilder,
    provider: Option<Arc<dyn EmbeddingProvider>>,
}

impl RecommenderBuilder {
    fn new() -> Self {
        Self {
            builder: crate::config::ConfigBuilder::new(),
            provider: None,
        }
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: RelevoConfig) -> Self {
        self.builder = crate::config::ConfigBuilder::from_config(config);
        self
    }

    /// Select the encoding strategy
    pub fn with_encoder_method(mut self, method: crate::encoder::EncoderMethod) -> Self {
        self.builder = self.builder.with_encoder_method(method);
        self
    }

    /// Set the item fields fed to the encoder
    pub fn with_text_fields(mut self, fields: Vec<crate::text::TextField>) -> Self {
        self.builder = self.builder.with_text_fields(fields);
        self
    }

    /// Cap the term-weighted vocabulary
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.builder = self.builder.with_max_features(max_features);
        self
    }

    /// Enable or disable the approximate-neighbor structure
    pub fn with_ann(mut self, use_ann: bool) -> Self {
        self.builder = self.builder.with_ann(use_ann);
        self
    }

    /// Set the personalization blend weights
    pub fn with_feed_weights(mut self, category: f64, price: f64, content: f64) -> Self {
        self.builder = self.builder.with_feed_weights(category, price, content);
        self
    }

    /// Set the per-event-type trending base weights
    pub fn with_trending_weights(mut self, click: f64, save: f64, purchase: f64) -> Self {
        self.builder = self.builder.with_trending_weights(click, save, purchase);
        self
    }

    /// Set the trending half-life in hours
    pub fn with_half_life_hours(mut self, hours: f64) -> Self {
        self.builder = self.builder.with_half_life_hours(hours);
        self
    }

    /// Supply a custom embedding provider (BYOE); used with the
    /// `embedding` encoder method
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<Recommender> {
        let config = self.builder.build()?;
        match self.provider {
            Some(provider) => Recommender::with_provider(config, provider),
            None => Recommender::new(config),
        }
    }
}
