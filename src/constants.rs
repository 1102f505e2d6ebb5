//! Cross-cutting, shared constants.
//!
//! Defaults mirror the corpus build: chunks of at most [`CHUNK_MAX_WORDS`]
//! words embedded with a 768-dimensional sentence model. Prefer overriding
//! via [`Config`](crate::config::Config) rather than editing these.

/// Output dimension of the sentence embedding model (all-mpnet-base-v2).
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

pub const DEFAULT_VECTOR_SIZE_U64: u64 = DEFAULT_EMBEDDING_DIM as u64;

/// Words per corpus chunk. Fixed by the corpus builder; recorded here so the
/// retrieval side can reason about context size.
pub const CHUNK_MAX_WORDS: usize = 500;

/// Characters of chunk text surfaced as a snippet in evidence blocks.
pub const SNIPPET_MAX_CHARS: usize = 500;

/// Raw nearest-neighbour hits requested from the vector index.
pub const DEFAULT_SEARCH_TOP_K: u64 = 5;

/// Ranked results kept after recency weighting. Independent of the raw
/// search k and may be smaller.
pub const DEFAULT_RESULT_CAP: usize = 5;

/// Ceiling on sources passed to the verification protocol.
pub const DEFAULT_MAX_SOURCES: usize = 5;

/// Exponential date-decay constant, per year of document age.
pub const DEFAULT_ALPHA: f64 = 0.05;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Token cap for each verification pass.
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Sampling temperature for each verification pass.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Per-call timeout for LLM requests, in seconds.
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 60;

/// Default chat model used by the verification protocol.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Max tokens fed to the embedding model per text.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;
