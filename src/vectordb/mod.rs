//! Qdrant vector index access.
//!
//! The corpus embeddings live in a pre-built, read-only Qdrant collection
//! using Euclidean distance; point ids equal chunk ids. This module only
//! searches — building and updating the index happen offline.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;

pub use client::{QdrantSearcher, VectorSearch};
pub use error::VectorDbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockVectorIndex, euclidean_distance};
pub use model::RawHit;

/// Default name of the corpus collection.
pub const DEFAULT_COLLECTION_NAME: &str = "veracity_corpus";

/// Default vector size of the corpus collection.
pub const DEFAULT_VECTOR_SIZE: u64 = crate::constants::DEFAULT_VECTOR_SIZE_U64;
