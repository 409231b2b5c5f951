//! End-to-end tests for the recommender facade
//!
//! Exercises the full build-then-query flow on the small demo catalog:
//! free-text search, item-to-item similarity, personalized feeds and
//! trending, plus the ordering and exclusion guarantees of each surface.

use relevo::prelude::*;

const HOUR: f64 = 3600.0;
const NOW: f64 = 1_700_000_000.0;

fn demo_catalog() -> Vec<Item> {
    vec![
        Item::new("1", "Modern Gray Sofa", "3-seater couch with linen fabric", "furniture", 499.0),
        Item::new("2", "Leather Couch", "Spacious brown sofa, premium leather", "furniture", 899.0),
        Item::new("3", "Office Chair", "Ergonomic mesh chair with lumbar support", "furniture", 199.0),
        Item::new("4", "iPhone 14", "128GB, midnight, excellent condition", "electronics", 699.0),
        Item::new("5", "Samsung Galaxy S23", "256GB, black, near-mint", "electronics", 749.0),
    ]
}

fn fitted_engine() -> Recommender {
    let config = ConfigBuilder::testing().build().unwrap();
    let engine = Recommender::new(config).unwrap();
    engine.fit(demo_catalog()).unwrap();
    engine
}

#[test]
fn search_for_sofa_returns_both_sofas_first() {
    let engine = fitted_engine();
    let results = engine.search("sofa", 2).unwrap();
    assert_eq!(results.len(), 2);
    let mut ids: Vec<&str> = results.iter().map(|r| r.item_id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(results.iter().all(|r| r.score > 0.0));
}

#[test]
fn search_results_are_sorted_and_bounded() {
    let engine = fitted_engine();
    let results = engine.search("leather sofa chair", 10).unwrap();
    assert_eq!(results.len(), 5);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(engine.search("leather sofa chair", 3).unwrap().len(), 3);
    assert!(engine.search("leather sofa chair", 0).unwrap().is_empty());
}

#[test]
fn similar_never_contains_the_anchor_item() {
    let engine = fitted_engine();
    for item in demo_catalog() {
        for k in 1..=5 {
            let results = engine.similar(&item.id, k).unwrap();
            assert!(results.iter().all(|r| r.item_id != item.id));
            assert_eq!(results.len(), k.min(4));
        }
    }
}

#[test]
fn similar_to_the_gray_sofa_finds_the_leather_couch() {
    let engine = fitted_engine();
    let results = engine.similar("1", 1).unwrap();
    assert_eq!(results[0].item_id, "2");
}

#[test]
fn similar_on_unknown_id_fails() {
    let engine = fitted_engine();
    assert!(matches!(
        engine.similar("999", 3),
        Err(RelevoError::ItemNotFound { .. })
    ));
}

#[test]
fn feed_excludes_seen_history_items() {
    let engine = fitted_engine();
    let history = vec!["1".to_string(), "2".to_string()];
    let results = engine.feed(&history, 10).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| !history.contains(&r.item_id)));
}

#[test]
fn feed_with_empty_history_degenerates_to_price_ordering() {
    let engine = fitted_engine();
    let results = engine.feed(&[], 5).unwrap();
    assert_eq!(results.len(), 5);
    // Category and content affinities are zero for every candidate, so the
    // ordering follows price affinity around the pool median of 699.
    let ids: Vec<&str> = results.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids[0], "4");
    assert_eq!(ids[4], "3");
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn feed_scores_scale_linearly_with_blend_weights() {
    let base_engine = fitted_engine();
    let scaled_engine = {
        let config = ConfigBuilder::testing()
            .with_feed_weights(0.4 * 2.5, 0.2 * 2.5, 0.4 * 2.5)
            .build()
            .unwrap();
        let engine = Recommender::new(config).unwrap();
        engine.fit(demo_catalog()).unwrap();
        engine
    };

    let history = vec!["1".to_string()];
    let base = base_engine.feed(&history, 5).unwrap();
    let scaled = scaled_engine.feed(&history, 5).unwrap();

    assert_eq!(base.len(), scaled.len());
    for (a, b) in base.iter().zip(scaled.iter()) {
        assert_eq!(a.item_id, b.item_id);
        assert!((b.score - a.score * 2.5).abs() < 1e-9);
    }
}

#[test]
fn trending_applies_half_life_decay() {
    let engine = fitted_engine();
    // purchase now: 5 * 0.5^0 = 5.0; click 48h ago: 1 * 0.5^2 = 0.25
    let events = vec![
        Event::new("A", NOW, EventType::Purchase),
        Event::new("A", NOW - 48.0 * HOUR, EventType::Click),
    ];
    let results = engine.trending_as_of(&events, NOW).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item_id, "A");
    assert!((results[0].score - 5.25).abs() < 1e-9);
}

#[test]
fn trending_ranks_by_decayed_weight_across_items() {
    let engine = fitted_engine();
    let events = vec![
        Event::new("old-purchase", NOW - 72.0 * HOUR, EventType::Purchase),
        Event::new("fresh-save", NOW, EventType::Save),
        Event::new("unknown-only", NOW, EventType::Other("share".to_string())),
    ];
    let results = engine.trending_as_of(&events, NOW).unwrap();
    // 2.0 fresh save beats 5 * 0.5^3 = 0.625 decayed purchase.
    assert_eq!(results[0].item_id, "fresh-save");
    assert_eq!(results[1].item_id, "old-purchase");
    assert_eq!(results[2].item_id, "unknown-only");
    assert_eq!(results[2].score, 0.0);
}

#[test]
fn repeated_calls_produce_identical_output() {
    let engine = fitted_engine();
    let history = vec!["3".to_string()];
    assert_eq!(
        engine.search("couch", 5).unwrap(),
        engine.search("couch", 5).unwrap()
    );
    assert_eq!(
        engine.similar("2", 4).unwrap(),
        engine.similar("2", 4).unwrap()
    );
    assert_eq!(
        engine.feed(&history, 4).unwrap(),
        engine.feed(&history, 4).unwrap()
    );
}

#[test]
fn init_wires_logging_and_returns_an_unfitted_engine() {
    let config = ConfigBuilder::testing().build().unwrap();
    let engine = relevo::init(config).unwrap();
    assert!(!engine.is_fitted());
    engine.fit(demo_catalog()).unwrap();
    assert!(engine.is_fitted());
}
