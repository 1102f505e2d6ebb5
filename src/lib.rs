//! Veracity library crate (used by integration tests and embedding
//! applications).
//!
//! Retrieval-augmented fact verification: a statement is embedded, matched
//! against a pre-indexed document corpus, the hits are re-ranked by
//! similarity and recency, and a two-pass LLM protocol turns the numbered
//! evidence into a structured [`Verdict`].
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`Verifier`] - End-to-end verification for one statement
//! - [`Verdict`], [`VerifyOutcome`], [`Truthfulness`] - Structured results
//!
//! ## Corpus & Retrieval
//! - [`CorpusStore`], [`ChunkMetadata`], [`PublicationType`] - Loaded corpus
//! - [`QdrantSearcher`], [`VectorSearch`] - Filtered nearest-neighbour search
//! - [`SentenceEmbedder`], [`TextEmbedder`] - Statement embedding
//! - [`RecencyRanker`], [`RankedSource`] - Recency-weighted ranking
//!
//! ## Protocol
//! - [`ChatGenerator`], [`GenAiGenerator`] - Provider access
//! - [`EvidenceContext`] - Numbered evidence shown to the model
//! - [`ProbabilityEstimate`], [`resolve_citations`] - Response handling
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `VERACITY_*` environment configuration
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod context;
pub mod corpus;
pub mod embedding;
pub mod llm;
pub mod ranking;
pub mod vectordb;
pub mod verify;

pub use config::{Config, ConfigError};
pub use context::{EvidenceContext, SourceRef, assemble};
pub use corpus::{ChunkMetadata, CorpusError, CorpusStore, PublicationType};
pub use embedding::{EmbedderConfig, EmbeddingError, SentenceEmbedder, TextEmbedder};
pub use llm::{ChatGenerator, GenAiGenerator, LlmError};
#[cfg(any(test, feature = "mock"))]
pub use llm::MockChatGenerator;
pub use ranking::{RankedSource, RecencyRanker};
pub use vectordb::{QdrantSearcher, RawHit, VectorDbError, VectorSearch};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockVectorIndex;
pub use verify::{
    ProbabilityEstimate, Truthfulness, Verdict, Verifier, VerifyError, VerifyOutcome,
    resolve_citations,
};
