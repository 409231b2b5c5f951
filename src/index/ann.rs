//! Approximate-neighbor backend (HNSW via `hora`)
//!
//! Built from the exact same vectors used for brute-force scoring, so the
//! candidates it proposes re-score and re-rank identically to the exact
//! path. Any build failure degrades to exact scoring, never to an error.

use crate::encoder::Vector;
use hora::core::ann_index::ANNIndex;
use hora::core::metrics::Metric;
use hora::index::hnsw_idx::HNSWIndex;
use hora::index::hnsw_params::HNSWParams;

/// HNSW candidate generator over dense, unit-normalized vectors.
pub(crate) struct AnnBackend {
    index: HNSWIndex<f32, usize>,
}

impl AnnBackend {
    /// Build the structure, or `None` when the vectors are not dense or
    /// the build fails.
    pub(crate) fn build(vectors: &[Vector]) -> Option<Self> {
        let dimension = vectors.first()?.as_dense()?.len();
        if dimension == 0 {
            return None;
        }

        let mut index = HNSWIndex::<f32, usize>::new(dimension, &HNSWParams::<f32>::default());
        for (position, vector) in vectors.iter().enumerate() {
            index.add(vector.as_dense()?, position).ok()?;
        }
        // Unit-normalized vectors make dot product equivalent to cosine.
        index.build(Metric::DotProduct).ok()?;
        Some(Self { index })
    }

    /// Positions of the nearest candidates to the query.
    pub(crate) fn search(&self, query: &[f32], k: usize) -> Vec<usize> {
        self.index.search(query, k)
    }
}
