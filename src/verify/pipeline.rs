//! End-to-end verification pipeline.
//!
//! Orchestrates the full flow for one statement: publication-type
//! filtering, statement embedding, filtered nearest-neighbour search,
//! recency-weighted ranking, evidence assembly, the two-pass LLM protocol,
//! probability parsing, and citation resolution.
//!
//! Failure handling is deliberately asymmetric: local faults (embedding,
//! index) are hard errors, while provider failures and missing evidence
//! degrade into [`VerifyOutcome`] variants so callers always receive a
//! well-formed outcome.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError};
use crate::context;
use crate::corpus::{CorpusStore, PublicationType};
use crate::embedding::TextEmbedder;
use crate::llm::ChatGenerator;
use crate::ranking::RecencyRanker;
use crate::vectordb::VectorSearch;

use super::citations::resolve_citations;
use super::error::VerifyError;
use super::probability::ProbabilityEstimate;
use super::protocol;
use super::types::{Verdict, VerifyOutcome};

/// Fact-verification pipeline over a loaded corpus, a vector index, and a
/// text-generation provider.
///
/// Generic over the index and embedder so tests can substitute in-memory
/// implementations; the chat generator is dynamic because providers are
/// selected at runtime by model name.
pub struct Verifier<V, E> {
    corpus: Arc<CorpusStore>,
    index: V,
    embedder: E,
    llm: Arc<dyn ChatGenerator>,
    ranker: RecencyRanker,
    config: Config,
}

impl<V, E> Verifier<V, E>
where
    V: VectorSearch,
    E: TextEmbedder,
{
    /// Wires the pipeline together. Validates the configuration up front
    /// so a bad alpha or source cap fails at startup, not mid-request.
    pub fn new(
        config: Config,
        corpus: Arc<CorpusStore>,
        index: V,
        embedder: E,
        llm: Arc<dyn ChatGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let ranker = RecencyRanker::new(config.alpha, config.result_cap);

        Ok(Self {
            corpus,
            index,
            embedder,
            llm,
            ranker,
            config,
        })
    }

    /// Verifies one statement against the corpus.
    ///
    /// `filter` restricts retrieval to the given publication types; an
    /// empty slice falls back to the configured allow-list. `max_sources`
    /// caps the evidence shown to the model for this request and is
    /// clamped to the configured ceiling.
    ///
    /// Returns `Err` only for local faults (embedding, index). Missing
    /// evidence and provider failures come back as [`VerifyOutcome`]
    /// variants.
    pub async fn verify(
        &self,
        statement: &str,
        filter: &[PublicationType],
        max_sources: usize,
    ) -> Result<VerifyOutcome, VerifyError> {
        let types: &[PublicationType] = if filter.is_empty() {
            &self.config.allowed_types
        } else {
            filter
        };

        let candidate_ids = self.corpus.ids_matching(types);
        if candidate_ids.is_empty() {
            info!(?types, "No corpus chunks match the publication-type filter");
            return Ok(VerifyOutcome::InsufficientEvidence);
        }

        let query = self.embedder.embed(statement)?;
        let hits = self
            .index
            .search(query, self.config.search_top_k, &candidate_ids)
            .await?;
        debug!(hits = hits.len(), candidates = candidate_ids.len(), "Search complete");

        let ranked = self.ranker.rank(&hits, &self.corpus, Utc::now().naive_utc());

        let cap = max_sources
            .min(self.config.max_sources)
            .min(self.config.result_cap);
        let Some(evidence) = context::assemble(&ranked, cap) else {
            info!("No rankable evidence for statement");
            return Ok(VerifyOutcome::InsufficientEvidence);
        };

        let pass1_prompt = protocol::build_pass1_prompt(statement, &evidence.combined);
        let analysis = match protocol::call_with_retry(
            self.llm.as_ref(),
            &pass1_prompt,
            self.config.call_timeout,
        )
        .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "Pass-1 generation failed");
                return Ok(VerifyOutcome::ProviderUnavailable {
                    message: err.to_string(),
                });
            }
        };

        let pass2_prompt = protocol::build_pass2_prompt(statement, &evidence.combined, &analysis);
        let breakdown = match protocol::call_with_retry(
            self.llm.as_ref(),
            &pass2_prompt,
            self.config.call_timeout,
        )
        .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "Pass-2 generation failed");
                return Ok(VerifyOutcome::ProviderUnavailable {
                    message: err.to_string(),
                });
            }
        };

        let estimate = ProbabilityEstimate::parse(&breakdown);
        if estimate.low_confidence {
            warn!("Probability breakdown incomplete; defaults substituted");
        }

        let statement_analysis = resolve_citations(&analysis, &evidence.sources);

        info!(
            sources = evidence.len(),
            verdict = %estimate.verdict(),
            "Verification complete"
        );

        Ok(VerifyOutcome::Verdict(Verdict {
            statement_analysis,
            sources: evidence.sources,
            probability_true: estimate.p_true,
            probability_false: estimate.p_false,
            probability_undecided: estimate.p_undecided,
            is_likely_true: estimate.verdict().as_bool(),
            low_confidence: estimate.low_confidence,
        }))
    }

    /// The loaded corpus backing this pipeline.
    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
