use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
/// Local faults in the verification pipeline.
///
/// Provider failures are not here — they surface as
/// [`VerifyOutcome::ProviderUnavailable`](super::VerifyOutcome) so the
/// fail-soft contract holds.
pub enum VerifyError {
    /// Embedding the statement failed.
    #[error("failed to embed statement: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The vector index search failed.
    #[error("vector search failed: {0}")]
    Index(#[from] VectorDbError),
}
