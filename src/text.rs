//! Deterministic text normalization and field concatenation
//!
//! Every piece of catalog text that reaches an encoder flows through this
//! module, so the representation of an item is identical at fit and query
//! time.

use crate::models::Item;
use serde::{Deserialize, Serialize};

/// Item text fields that can feed the encoded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    /// The item title
    Title,
    /// The item description
    Description,
    /// The item category label
    Category,
}

impl TextField {
    fn extract<'a>(&self, item: &'a Item) -> &'a str {
        match self {
            Self::Title => &item.title,
            Self::Description => &item.description,
            Self::Category => &item.category,
        }
    }
}

/// Lowercase and trim a piece of text.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Concatenate the designated text fields of an item into one normalized
/// document.
pub fn item_document(item: &Item, fields: &[TextField]) -> String {
    fields
        .iter()
        .map(|field| normalize(field.extract(item)))
        .collect::<Vec<_>>()
        .join(" \n")
}

/// Build a user profile document from the items in a history.
pub fn profile_document(items: &[&Item], fields: &[TextField]) -> String {
    items
        .iter()
        .map(|item| item_document(item, fields))
        .collect::<Vec<_>>()
        .join(" \n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sofa() -> Item {
        Item::new(
            "1",
            "  Modern Gray Sofa ",
            "3-Seater Couch",
            "Furniture",
            499.0,
        )
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Hello World  "), "hello world");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_item_document_uses_designated_fields() {
        let doc = item_document(&sofa(), &[TextField::Title, TextField::Description]);
        assert_eq!(doc, "modern gray sofa \n3-seater couch");
    }

    #[test]
    fn test_item_document_can_include_category() {
        let doc = item_document(&sofa(), &[TextField::Category]);
        assert_eq!(doc, "furniture");
    }

    #[test]
    fn test_profile_document_concatenates_history() {
        let a = sofa();
        let b = Item::new("2", "Office Chair", "Mesh chair", "furniture", 199.0);
        let doc = profile_document(&[&a, &b], &[TextField::Title]);
        assert_eq!(doc, "modern gray sofa \noffice chair");
    }

    #[test]
    fn test_profile_document_empty_history() {
        assert_eq!(profile_document(&[], &[TextField::Title]), "");
    }
}
