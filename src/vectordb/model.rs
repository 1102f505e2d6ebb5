use qdrant_client::qdrant::ScoredPoint;
use qdrant_client::qdrant::point_id::PointIdOptions;

/// One raw nearest-neighbour hit: chunk id plus Euclidean distance
/// (lower is closer). Ranking converts the distance to a similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawHit {
    pub id: u64,
    pub distance: f32,
}

impl RawHit {
    /// Builds a hit from a Qdrant scored point.
    ///
    /// The corpus collection is created with Euclidean distance, so the
    /// point score is the distance itself. Points without a numeric id are
    /// dropped; the corpus builder only writes numeric ids.
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n,
            _ => return None,
        };

        Some(RawHit {
            id,
            distance: point.score,
        })
    }
}
