//! Text embedding.
//!
//! [`SentenceEmbedder`] wraps the sentence model the corpus was built with;
//! [`TextEmbedder`] is the seam the pipeline consumes, so tests can inject
//! fixed vectors.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;

/// Embedder configuration.
pub mod config;
/// BERT sentence embedder.
pub mod sentence;

pub use config::{EMBEDDING_DIM, EMBEDDING_MAX_SEQ_LEN, EmbedderConfig};
pub use error::EmbeddingError;
pub use sentence::SentenceEmbedder;

/// Text to fixed-size vector.
///
/// Implementations must be immutable after construction; the pipeline shares
/// one instance across concurrent requests.
pub trait TextEmbedder: Send + Sync {
    /// Embeds `text` into a vector of [`dimension`](TextEmbedder::dimension) floats.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Output vector dimension.
    fn dimension(&self) -> usize;
}
