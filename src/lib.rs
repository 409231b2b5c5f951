//! # Relevo
//!
//! In-memory search, similarity and recommendation ranking for product
//! catalogs. Relevo builds a cosine-similarity index over catalog text using
//! either term-weighted (tf-idf) vectors or embeddings via BYOE (Bring Your
//! Own Embeddings), and layers personalized and trending feeds on top.
//!
//! ## Quick Start
//!
//! ```rust
//! use relevo::prelude::*;
//!
//! fn main() -> relevo::Result<()> {
//!     // Defaults: tf-idf encoder over title + description
//!     let engine = Recommender::builder().build()?;
//!
//!     engine.fit(vec![
//!         Item::new("1", "Modern Gray Sofa", "3-seater couch with linen fabric", "furniture", 499.0),
//!         Item::new("2", "Leather Couch", "Spacious brown sofa, premium leather", "furniture", 899.0),
//!         Item::new("3", "Office Chair", "Ergonomic mesh chair with lumbar support", "furniture", 199.0),
//!     ])?;
//!
//!     // Free-text search
//!     let hits = engine.search("sofa", 2)?;
//!     assert_eq!(hits.len(), 2);
//!
//!     // Item-to-item similarity
//!     let neighbors = engine.similar("1", 2)?;
//!     assert!(neighbors.iter().all(|r| r.item_id != "1"));
//!     Ok(())
//! }
//! ```
//!
//! ## BYOE (Bring Your Own Embeddings)
//!
//! The embedding encoder delegates to any [`EmbeddingProvider`] you supply:
//!
//! - **OpenAI / Cohere / Azure**: wrap your API client in the trait
//! - **Local**: fastembed, Ollama, sentence-transformers servers
//! - **Built-in**: the dependency-free [`HashEmbedder`]
//!
//! This keeps the ranking core model-agnostic and free of network code.
//!
//! ## Architecture
//!
//! - **Core**: text normalizer, vector encoders, exact cosine index,
//!   personalization blender, trending ranker (always available)
//! - **Optional**: approximate nearest-neighbor acceleration (`ann` feature);
//!   falls back transparently to exact scoring when unavailable
//!
//! Catalog storage, event ingestion and any HTTP surface are collaborators
//! that live outside this crate; score outputs are plain sorted lists ready
//! for serialization by any transport.
//!
//! [`EmbeddingProvider`]: crate::encoder::EmbeddingProvider
//! [`HashEmbedder`]: crate::encoder::HashEmbedder

pub mod config;
pub mod encoder;
pub mod engine;
pub mod index;
pub mod logging;
pub mod models;
pub mod personalize;
pub mod text;
pub mod trending;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Re-export the facade (recommended entry point)
    pub use crate::engine::{Recommender, RecommenderBuilder};

    // Re-export core initialization
    pub use crate::init;

    // Re-export config types
    pub use crate::config::{
        ConfigBuilder, ConfigLoader, LogFormat, LogLevel, LoggingConfig, RelevoConfig,
    };

    // Re-export model types
    pub use crate::models::{Event, EventType, Item, ScoredResult};

    // Re-export encoder types for advanced usage
    pub use crate::encoder::{
        EmbeddingProvider, EncoderConfig, EncoderMethod, HashEmbedder, TextEncoder, Vector,
    };

    // Re-export scoring components for advanced usage
    pub use crate::index::SimilarityIndex;
    pub use crate::personalize::{FeedConfig, PersonalizedFeed};
    pub use crate::text::TextField;
    pub use crate::trending::{TrendingConfig, TrendingRanker};

    // Re-export essential result type
    pub use crate::{RelevoError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Relevo operations with helpful recovery suggestions
#[derive(Debug, thiserror::Error)]
pub enum RelevoError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Query issued before the first successful fit
    #[error(
        "Engine not fitted. Call fit() with the catalog before issuing queries, then retry"
    )]
    NotFitted,

    /// Reference to an item id absent from the fitted index
    #[error(
        "Item '{id}' is not in the fitted index. Check the id, or refit if the catalog changed"
    )]
    ItemNotFound { id: String },

    /// Fit attempted on an empty catalog
    #[error("Cannot fit on an empty catalog. Provide at least one item")]
    EmptyCorpus,

    /// Embedding provider failure
    #[error("Embedding provider error: {0}")]
    Provider(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),
}

impl From<crate::config::ConfigError> for RelevoError {
    fn from(err: crate::config::ConfigError) -> Self {
        RelevoError::Configuration(err.to_string())
    }
}

/// Result type for Relevo operations
pub type Result<T> = std::result::Result<T, RelevoError>;

/// Initialize Relevo with the provided configuration
///
/// Sets up structured logging from `config.logging`, then constructs a
/// [`Recommender`](crate::engine::Recommender). The returned engine is
/// unfitted; call `fit()` with the catalog before querying.
///
/// # Examples
///
/// ```rust
/// use relevo::prelude::*;
///
/// fn example() -> relevo::Result<()> {
///     let config = ConfigBuilder::defaults().build()?;
///     let engine = relevo::init(config)?;
///     Ok(())
/// }
/// ```
pub fn init(config: config::RelevoConfig) -> Result<engine::Recommender> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    engine::Recommender::new(config)
}
