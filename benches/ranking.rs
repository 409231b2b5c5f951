//! Ranking benchmarks over a synthetic catalog

use criterion::{Criterion, criterion_group, criterion_main};
use relevo::prelude::*;

fn synthetic_catalog(n: usize) -> Vec<Item> {
    let adjectives = [
        "modern", "vintage", "compact", "ergonomic", "wireless", "leather", "wooden", "portable",
    ];
    let nouns = [
        "sofa", "chair", "desk", "lamp", "phone", "headphones", "monitor", "keyboard",
    ];
    let categories = ["furniture", "electronics", "lighting"];
    (0..n)
        .map(|i| {
            let adjective = adjectives[i % adjectives.len()];
            let noun = nouns[(i / adjectives.len()) % nouns.len()];
            Item::new(
                i.to_string(),
                format!("{adjective} {noun}"),
                format!("{adjective} {noun} with premium finish, model {i}"),
                categories[i % categories.len()],
                (i % 997) as f64,
            )
        })
        .collect()
}

fn fitted_engine(items: Vec<Item>) -> Recommender {
    let config = ConfigBuilder::testing().build().unwrap();
    let engine = Recommender::new(config).unwrap();
    engine.fit(items).unwrap();
    engine
}

fn bench_queries(c: &mut Criterion) {
    let engine = fitted_engine(synthetic_catalog(1_000));
    let history: Vec<String> = (0..20).map(|i| i.to_string()).collect();

    c.bench_function("search_top10_1k_items", |b| {
        b.iter(|| engine.search("wireless headphones", 10).unwrap())
    });
    c.bench_function("similar_top10_1k_items", |b| {
        b.iter(|| engine.similar("42", 10).unwrap())
    });
    c.bench_function("feed_top20_1k_items", |b| {
        b.iter(|| engine.feed(&history, 20).unwrap())
    });
}

fn bench_fit(c: &mut Criterion) {
    let items = synthetic_catalog(1_000);
    let config = ConfigBuilder::testing().build().unwrap();
    let engine = Recommender::new(config).unwrap();

    c.bench_function("fit_1k_items", |b| b.iter(|| engine.fit(items.clone()).unwrap()));
}

criterion_group!(benches, bench_queries, bench_fit);
criterion_main!(benches);
