//! Data model shared by all scoring components

mod event;
mod item;

pub use event::{Event, EventType};
pub use item::{Item, ScoredResult};

use std::cmp::Ordering;

/// Sort scored results by descending score, breaking ties by ascending
/// item id.
///
/// Every ranked surface (search, similarity, feed, trending) shares this
/// ordering so repeated calls with identical inputs are reproducible.
pub fn rank_descending(results: &mut [ScoredResult]) {
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_descending_orders_by_score() {
        let mut results = vec![
            ScoredResult::new("a", 0.1),
            ScoredResult::new("b", 0.9),
            ScoredResult::new("c", 0.5),
        ];
        rank_descending(&mut results);
        let ids: Vec<&str> = results.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_descending_breaks_ties_by_id() {
        let mut results = vec![
            ScoredResult::new("z", 0.5),
            ScoredResult::new("a", 0.5),
            ScoredResult::new("m", 0.5),
        ];
        rank_descending(&mut results);
        let ids: Vec<&str> = results.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "m", "z"]);
    }
}
