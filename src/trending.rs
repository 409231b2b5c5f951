//! Trending item ranking
//!
//! Aggregates event weights with exponential half-life decay into per-item
//! trend scores. Scoring is a pure read of an event batch plus an "as of"
//! timestamp; no state is kept between calls.

use crate::models::{Event, EventType, ScoredResult, rank_descending};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for trending computation.
///
/// Base weights order the default event value as click < save < purchase;
/// each is independently configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingConfig {
    /// Base weight of a click event
    pub click_weight: f64,

    /// Base weight of a save event
    pub save_weight: f64,

    /// Base weight of a purchase event
    pub purchase_weight: f64,

    /// Hours for an event's weight to halve
    pub half_life_hours: f64,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            click_weight: 1.0,
            save_weight: 2.0,
            purchase_weight: 5.0,
            half_life_hours: 24.0,
        }
    }
}

impl TrendingConfig {
    /// Validate the configuration, returning an error if invalid
    pub fn validate(&self) -> Result<(), String> {
        for (name, weight) in [
            ("click_weight", self.click_weight),
            ("save_weight", self.save_weight),
            ("purchase_weight", self.purchase_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!("{} must be a finite value >= 0.0", name));
            }
        }
        if !self.half_life_hours.is_finite() || self.half_life_hours <= 0.0 {
            return Err("half_life_hours must be greater than 0.0".to_string());
        }
        Ok(())
    }
}

/// Time-decayed event aggregator.
pub struct TrendingRanker {
    config: TrendingConfig,
}

impl TrendingRanker {
    /// Create a new ranker with the given configuration
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn new(config: TrendingConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("Invalid trending config: {}", e);
        }
        Self { config }
    }

    /// Create a new ranker, returning an error if the configuration is
    /// invalid
    pub fn try_new(config: TrendingConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &TrendingConfig {
        &self.config
    }

    fn base_weight(&self, event_type: &EventType) -> f64 {
        match event_type {
            EventType::Click => self.config.click_weight,
            EventType::Save => self.config.save_weight,
            EventType::Purchase => self.config.purchase_weight,
            // Unknown kinds degrade gracefully instead of erroring
            EventType::Other(_) => 0.0,
        }
    }

    /// Decay factor for an event age in hours.
    ///
    /// Negative ages (future timestamps) yield factors above 1.0. That is
    /// deliberate, preserved behavior; see the tests pinning it.
    fn decay(&self, age_hours: f64) -> f64 {
        0.5f64.powf(age_hours / self.config.half_life_hours)
    }

    /// Aggregate decayed event weights per item, sorted by descending
    /// trend score with ties broken by ascending id.
    pub fn score(&self, events: &[Event], as_of: f64) -> Vec<ScoredResult> {
        let mut totals: HashMap<String, f64> = HashMap::new();
        for event in events {
            let age_hours = (as_of - event.timestamp) / 3600.0;
            let weight = self.base_weight(&event.event_type) * self.decay(age_hours);
            *totals.entry(event.item_id.clone()).or_insert(0.0) += weight;
        }

        let mut results: Vec<ScoredResult> = totals
            .into_iter()
            .map(|(item_id, score)| ScoredResult { item_id, score })
            .collect();
        rank_descending(&mut results);
        results
    }
}
