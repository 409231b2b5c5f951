//! Quickstart: build an index over a small catalog and run every query
//! surface.
//!
//! Run with: cargo run --example quickstart

use chrono::Utc;
use relevo::prelude::*;

fn main() -> relevo::Result<()> {
    let config = ConfigBuilder::defaults()
        .with_log_level(LogLevel::Warn)
        .build()?;
    let engine = relevo::init(config)?;

    engine.fit(vec![
        Item::new("1", "Modern Gray Sofa", "3-seater couch with linen fabric", "furniture", 499.0),
        Item::new("2", "Leather Couch", "Spacious brown sofa, premium leather", "furniture", 899.0),
        Item::new("3", "Office Chair", "Ergonomic mesh chair with lumbar support", "furniture", 199.0),
        Item::new("4", "iPhone 14", "128GB, midnight, excellent condition", "electronics", 699.0),
        Item::new("5", "Samsung Galaxy S23", "256GB, black, near-mint", "electronics", 749.0),
    ])?;

    println!("search(\"sofa\"):");
    for hit in engine.search("sofa", 3)? {
        println!("  {:<3} {:.4}", hit.item_id, hit.score);
    }

    println!("similar(\"1\"):");
    for hit in engine.similar("1", 3)? {
        println!("  {:<3} {:.4}", hit.item_id, hit.score);
    }

    println!("feed(history = [1, 2]):");
    let history = vec!["1".to_string(), "2".to_string()];
    for hit in engine.feed(&history, 3)? {
        println!("  {:<3} {:.4}", hit.item_id, hit.score);
    }

    println!("trending:");
    let now = Utc::now().timestamp() as f64;
    let events = vec![
        Event::new("1", now, EventType::Purchase),
        Event::new("1", now - 48.0 * 3600.0, EventType::Click),
        Event::new("4", now - 2.0 * 3600.0, EventType::Save),
    ];
    for hit in engine.trending(&events)? {
        println!("  {:<3} {:.4}", hit.item_id, hit.score);
    }

    Ok(())
}
