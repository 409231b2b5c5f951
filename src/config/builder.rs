//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::encoder::EncoderMethod;
use crate::text::TextField;
use std::path::{Path, PathBuf};

/// Builder for creating RelevoConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: RelevoConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: RelevoConfig::default(),
        }
    }

    /// Create a builder seeded with default values (alias of `new`,
    /// reads better at call sites like `ConfigBuilder::defaults().build()`)
    pub fn defaults() -> Self {
        Self::new()
    }

    /// Create a builder from an existing configuration.
    pub fn from_config(config: RelevoConfig) -> Self {
        Self { config }
    }

    /// Create a builder tuned for tests: quiet logging, no approximate
    /// structure.
    pub fn testing() -> Self {
        let mut builder = Self::new();
        builder.config.logging.level = LogLevel::Error;
        builder.config.logging.stdout = false;
        builder.config.encoder.use_ann = false;
        builder
    }

    /// Select the encoding strategy.
    pub fn with_encoder_method(mut self, method: EncoderMethod) -> Self {
        self.config.encoder.method = method;
        self
    }

    /// Set the item fields concatenated into the encoded document.
    pub fn with_text_fields(mut self, fields: Vec<TextField>) -> Self {
        self.config.encoder.text_fields = fields;
        self
    }

    /// Cap the term-weighted vocabulary size.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.config.encoder.max_features = max_features;
        self
    }

    /// Include or exclude adjacent-word pairs as vocabulary units.
    pub fn with_bigrams(mut self, bigrams: bool) -> Self {
        self.config.encoder.bigrams = bigrams;
        self
    }

    /// Set the output dimension of the built-in hashing embedder.
    pub fn with_embedding_dimension(mut self, dimension: usize) -> Self {
        self.config.encoder.embedding_dimension = dimension;
        self
    }

    /// Enable or disable the approximate-neighbor structure.
    pub fn with_ann(mut self, use_ann: bool) -> Self {
        self.config.encoder.use_ann = use_ann;
        self
    }

    /// Set the personalization blend weights.
    pub fn with_feed_weights(mut self, category: f64, price: f64, content: f64) -> Self {
        self.config.feed.category_weight = category;
        self.config.feed.price_weight = price;
        self.config.feed.content_weight = content;
        self
    }

    /// Set the per-event-type trending base weights.
    pub fn with_trending_weights(mut self, click: f64, save: f64, purchase: f64) -> Self {
        self.config.trending.click_weight = click;
        self.config.trending.save_weight = save;
        self.config.trending.purchase_weight = purchase;
        self
    }

    /// Set the trending half-life in hours.
    pub fn with_half_life_hours(mut self, hours: f64) -> Self {
        self.config.trending.half_life_hours = hours;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Log to the given file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(PathBuf::from(path.as_ref()));
        self
    }

    /// Enable or disable stdout logging.
    pub fn with_stdout_logging(mut self, stdout: bool) -> Self {
        self.config.logging.stdout = stdout;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<RelevoConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
