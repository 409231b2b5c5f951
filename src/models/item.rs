//! Catalog item model

use serde::{Deserialize, Serialize};

/// A catalog item.
///
/// Items are immutable once indexed; any catalog change requires a full
/// index rebuild via `Recommender::fit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, stable identifier
    pub id: String,

    /// Item title
    pub title: String,

    /// Longer free-text description
    pub description: String,

    /// Category label (e.g. "furniture", "electronics")
    pub category: String,

    /// Non-negative price
    pub price: f64,
}

impl Item {
    /// Create a new catalog item
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            price,
        }
    }
}

/// A single ranked result: an item id and its real-valued score.
///
/// Produced fresh per query, never persisted; ready for serialization by
/// any outer transport without further processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Id of the scored item
    pub item_id: String,

    /// Score; higher ranks first
    pub score: f64,
}

impl ScoredResult {
    /// Create a new scored result
    pub fn new(item_id: impl Into<String>, score: f64) -> Self {
        Self {
            item_id: item_id.into(),
            score,
        }
    }
}
