use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::constants::{DAYS_PER_YEAR, SNIPPET_MAX_CHARS};
use crate::corpus::CorpusStore;
use crate::vectordb::RawHit;

use super::types::RankedSource;

/// Converts an index distance into a similarity in (0, 1],
/// strictly decreasing in distance.
pub fn similarity_from_distance(distance: f64) -> f64 {
    1.0 / (1.0 + distance)
}

/// Exponential recency weight in (0, 1], non-increasing in age.
pub fn date_weight(alpha: f64, days_since_publication: f64) -> f64 {
    (-alpha * days_since_publication / DAYS_PER_YEAR).exp()
}

/// Blends vector distance and document age into one ranking.
#[derive(Debug, Clone, Copy)]
pub struct RecencyRanker {
    alpha: f64,
    result_cap: usize,
}

impl RecencyRanker {
    /// Creates a ranker with decay constant `alpha` and a cap on ranked
    /// results (independent of the raw search k; may be smaller).
    pub fn new(alpha: f64, result_cap: usize) -> Self {
        Self { alpha, result_cap }
    }

    /// Scores raw hits against the corpus and returns them ordered by
    /// descending weighted score, truncated to the result cap.
    ///
    /// The sort is stable: equal weighted scores keep their retrieval
    /// order. Hits without a parseable publication date are skipped — a
    /// document whose recency cannot be assessed is never surfaced as
    /// evidence.
    pub fn rank(&self, hits: &[RawHit], corpus: &CorpusStore, now: NaiveDateTime) -> Vec<RankedSource> {
        let mut ranked: Vec<RankedSource> = Vec::with_capacity(hits.len());

        for hit in hits {
            let (Some(text), Some(meta)) = (corpus.chunk_text(hit.id), corpus.metadata(hit.id))
            else {
                warn!(chunk_id = hit.id, "Index returned an id outside the corpus; skipping");
                continue;
            };

            let Some(published) = meta.parsed_date() else {
                warn!(
                    chunk_id = hit.id,
                    date = %meta.publication_date,
                    "Unparseable publication date; skipping hit"
                );
                continue;
            };

            let days = (now - published).num_days().max(0) as f64;
            let similarity_score = similarity_from_distance(f64::from(hit.distance.max(0.0)));
            let date_weight = date_weight(self.alpha, days);

            ranked.push(RankedSource {
                chunk_id: hit.id,
                title: meta.title.clone(),
                url: meta.article_url.clone(),
                pdf_url: meta.pdf_url.clone(),
                snippet: snippet_of(text),
                similarity_score,
                date_weight,
                weighted_score: similarity_score * date_weight,
                publication_type: meta.publication_type,
                publication_date: meta.display_date(),
                summary: meta.summary.clone(),
            });
        }

        // sort_by is stable; ties preserve retrieval order.
        ranked.sort_by(|a, b| {
            b.weighted_score
                .partial_cmp(&a.weighted_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(self.result_cap);

        debug!(hits = hits.len(), ranked = ranked.len(), "Recency-weighted ranking done");
        ranked
    }
}

/// Chunk prefix with newlines collapsed to spaces.
fn snippet_of(text: &str) -> String {
    text.chars()
        .take(SNIPPET_MAX_CHARS)
        .collect::<String>()
        .replace(['\n', '\r'], " ")
}
