//! Interaction event model for trending computation

use serde::{Deserialize, Serialize};

/// Kinds of user interaction events.
///
/// Unknown strings deserialize into [`EventType::Other`] and carry zero
/// weight in trending scores, so future event kinds degrade gracefully
/// instead of failing the batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// Item page view / click
    Click,
    /// Item saved to a wishlist or favorites
    Save,
    /// Item purchased
    Purchase,
    /// Any event kind this crate does not score
    Other(String),
}

impl EventType {
    /// Convert a string to an EventType
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "click" => Self::Click,
            "save" => Self::Save,
            "purchase" => Self::Purchase,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Click => write!(f, "click"),
            Self::Save => write!(f, "save"),
            Self::Purchase => write!(f, "purchase"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.to_string()
    }
}

/// An immutable interaction fact.
///
/// Trending computation is a pure read of a batch of events plus an "as of"
/// timestamp; events are never mutated or stored by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Id of the item the event refers to
    pub item_id: String,

    /// Seconds since the Unix epoch
    pub timestamp: f64,

    /// What happened
    pub event_type: EventType,
}

impl Event {
    /// Create a new event
    pub fn new(item_id: impl Into<String>, timestamp: f64, event_type: EventType) -> Self {
        Self {
            item_id: item_id.into(),
            timestamp,
            event_type,
        }
    }
}
