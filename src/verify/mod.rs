//! Statement verification.
//!
//! The [`Verifier`] runs the full pipeline for one statement: retrieve
//! evidence from the corpus, rank it by similarity and recency, show it to
//! the model as numbered sources, run the two-pass protocol, and fold the
//! answers into a structured [`Verdict`].

pub mod citations;
pub mod error;
pub mod pipeline;
pub mod probability;
pub mod protocol;
pub mod types;

pub use citations::resolve_citations;
pub use error::VerifyError;
pub use pipeline::Verifier;
pub use probability::ProbabilityEstimate;
pub use types::{Truthfulness, Verdict, VerifyOutcome};
