//! BYOE: plug a custom embedding provider into the embedding encoder.
//!
//! The provider here is a toy letter-frequency embedder; in a real
//! application it would wrap an API client (OpenAI, Cohere, ...) or a
//! local model server.
//!
//! Run with: cargo run --example byoe_embeddings

use relevo::prelude::*;
use std::sync::Arc;

/// Embeds text as normalized letter frequencies over a-z.
struct LetterFrequencyProvider;

impl EmbeddingProvider for LetterFrequencyProvider {
    fn dimension(&self) -> usize {
        26
    }

    fn embed(&self, texts: &[String]) -> relevo::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.0f32; 26];
                for c in text.chars().filter(|c| c.is_ascii_lowercase()) {
                    vector[(c as u8 - b'a') as usize] += 1.0;
                }
                vector
            })
            .collect())
    }
}

fn main() -> relevo::Result<()> {
    let engine = Recommender::builder()
        .with_encoder_method(EncoderMethod::Embedding)
        .with_provider(Arc::new(LetterFrequencyProvider))
        .build()?;

    engine.fit(vec![
        Item::new("1", "Modern Gray Sofa", "3-seater couch with linen fabric", "furniture", 499.0),
        Item::new("2", "Leather Couch", "Spacious brown sofa, premium leather", "furniture", 899.0),
        Item::new("3", "Office Chair", "Ergonomic mesh chair with lumbar support", "furniture", 199.0),
    ])?;

    println!("search(\"brown leather sofa\") with custom embeddings:");
    for hit in engine.search("brown leather sofa", 3)? {
        println!("  {:<3} {:.4}", hit.item_id, hit.score);
    }

    Ok(())
}
