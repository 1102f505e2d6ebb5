use qdrant_client::Qdrant;
use qdrant_client::qdrant::{Condition, Filter, PointId, SearchPointsBuilder};

use super::error::VectorDbError;
use super::model::RawHit;

#[derive(Clone)]
/// Qdrant-backed access to the pre-built corpus index.
pub struct QdrantSearcher {
    client: Qdrant,
    url: String,
    collection: String,
}

impl QdrantSearcher {
    /// Connects to `url` and verifies that `collection` exists.
    ///
    /// The index is read-only input; if the collection is absent the
    /// process must not serve requests, so this fails at startup.
    pub async fn connect(url: &str, collection: &str) -> Result<Self, VectorDbError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let exists = client.collection_exists(collection).await.map_err(|e| {
            VectorDbError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;
        if !exists {
            return Err(VectorDbError::CollectionMissing {
                collection: collection.to_string(),
            });
        }

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.to_string(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the corpus collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorDbError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Searches the corpus collection, restricted to `id_filter`.
    ///
    /// Hits come back ordered by ascending distance.
    pub async fn search(
        &self,
        query: Vec<f32>,
        k: u64,
        id_filter: &[u64],
    ) -> Result<Vec<RawHit>, VectorDbError> {
        let ids: Vec<PointId> = id_filter.iter().map(|&id| PointId::from(id)).collect();
        let filter = Filter::must([Condition::has_id(ids)]);

        let search_builder = SearchPointsBuilder::new(&self.collection, query, k)
            .filter(filter)
            .with_payload(false);

        let response = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| VectorDbError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(response
            .result
            .into_iter()
            .filter_map(RawHit::from_scored_point)
            .collect())
    }
}

/// Minimal async interface used by the pipeline.
///
/// The caller is responsible for short-circuiting an empty `id_filter`
/// before reaching the index (see the pipeline's retrieval step).
pub trait VectorSearch: Send + Sync {
    /// Searches for the `k` nearest neighbours among `id_filter`.
    fn search(
        &self,
        query: Vec<f32>,
        k: u64,
        id_filter: &[u64],
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, VectorDbError>> + Send;
}

impl VectorSearch for QdrantSearcher {
    async fn search(
        &self,
        query: Vec<f32>,
        k: u64,
        id_filter: &[u64],
    ) -> Result<Vec<RawHit>, VectorDbError> {
        self.search(query, k, id_filter).await
    }
}
