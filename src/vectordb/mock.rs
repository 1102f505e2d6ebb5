use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::VectorDbError;
use super::model::RawHit;
use crate::vectordb::VectorSearch;

/// In-memory exact-search stand-in for the Qdrant index.
///
/// Tracks how often `search` is invoked so tests can assert that the
/// pipeline short-circuits before reaching the index.
#[derive(Default)]
pub struct MockVectorIndex {
    points: Vec<(u64, Vec<f32>)>,
    search_calls: AtomicUsize,
}

impl MockVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point; ids are expected to be unique.
    pub fn insert(&mut self, id: u64, vector: Vec<f32>) {
        self.points.push((id, vector));
    }

    /// Number of times `search` has been invoked.
    pub fn search_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

impl VectorSearch for MockVectorIndex {
    async fn search(
        &self,
        query: Vec<f32>,
        k: u64,
        id_filter: &[u64],
    ) -> Result<Vec<RawHit>, VectorDbError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        let mut hits: Vec<RawHit> = self
            .points
            .iter()
            .filter(|(id, _)| id_filter.contains(id))
            .map(|(id, vector)| RawHit {
                id: *id,
                distance: euclidean_distance(&query, vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k as usize);
        Ok(hits)
    }
}

/// Euclidean (L2) distance between two vectors of equal length.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}
