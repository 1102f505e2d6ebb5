use serde::Serialize;

use crate::corpus::PublicationType;

/// One ranked evidence candidate, ephemeral per query.
///
/// `weighted_score = similarity_score * date_weight`, both factors in (0, 1].
#[derive(Debug, Clone, Serialize)]
pub struct RankedSource {
    /// Id of the backing corpus chunk.
    pub chunk_id: u64,
    pub title: String,
    /// Article URL from the chunk metadata.
    pub url: String,
    pub pdf_url: String,
    /// Chunk prefix (≤ 500 chars, newlines collapsed).
    pub snippet: String,
    /// `1 / (1 + distance)`.
    pub similarity_score: f64,
    /// `exp(-alpha * days_since_publication / 365)`.
    pub date_weight: f64,
    pub weighted_score: f64,
    pub publication_type: PublicationType,
    /// Human-readable publication date.
    pub publication_date: String,
    pub summary: String,
}
