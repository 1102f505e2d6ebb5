//! End-to-end pipeline tests against in-memory index and scripted provider.

use std::sync::Arc;

use veracity::embedding::EmbeddingError;
use veracity::vectordb::{RawHit, VectorDbError};
use veracity::{
    ChunkMetadata, Config, CorpusStore, MockChatGenerator, MockVectorIndex, PublicationType,
    TextEmbedder, Verifier, VerifyOutcome, VectorSearch,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Embedder that answers every statement with the same fixed vector, so
/// tests control retrieval order purely through the index points.
struct FixedEmbedder(Vec<f32>);

impl TextEmbedder for FixedEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.0.clone())
    }

    fn dimension(&self) -> usize {
        self.0.len()
    }
}

/// Shares one [`MockVectorIndex`] between the verifier and the test body so
/// call counts stay observable after the verifier takes ownership.
struct SharedIndex(Arc<MockVectorIndex>);

impl VectorSearch for SharedIndex {
    async fn search(
        &self,
        query: Vec<f32>,
        k: u64,
        id_filter: &[u64],
    ) -> Result<Vec<RawHit>, VectorDbError> {
        self.0.search(query, k, id_filter).await
    }
}

fn meta(title: &str, publication_type: PublicationType, date: &str) -> ChunkMetadata {
    ChunkMetadata {
        title: title.to_string(),
        article_url: format!("http://example.org/{}", title.replace(' ', "-")),
        pdf_url: "No PDF URL".to_string(),
        publication_type,
        publication_date: date.to_string(),
        summary: "No Summary".to_string(),
    }
}

fn report_corpus() -> Arc<CorpusStore> {
    Arc::new(
        CorpusStore::from_parts(
            vec![
                "Grid capacity grew by four gigawatts last year.".to_string(),
                "Electric vehicle sales doubled across the region.".to_string(),
                "Consultation on planning reform closed in March.".to_string(),
            ],
            vec![
                meta("Grid Report", PublicationType::Report, "Jan 03, 2025, 10:15:00 AM"),
                meta("EV Outlook", PublicationType::Report, "Jan 03, 2025, 10:15:00 AM"),
                meta("Planning Note", PublicationType::Report, "Jan 03, 2025, 10:15:00 AM"),
            ],
        )
        .expect("corpus parts are consistent"),
    )
}

fn default_index() -> Arc<MockVectorIndex> {
    let mut index = MockVectorIndex::new();
    index.insert(0, vec![0.1, 0.0, 0.0]);
    index.insert(1, vec![0.5, 0.0, 0.0]);
    index.insert(2, vec![2.0, 0.0, 0.0]);
    Arc::new(index)
}

fn verifier(
    corpus: Arc<CorpusStore>,
    index: Arc<MockVectorIndex>,
    llm: Arc<MockChatGenerator>,
    config: Config,
) -> Verifier<SharedIndex, FixedEmbedder> {
    init_tracing();
    Verifier::new(
        config,
        corpus,
        SharedIndex(index),
        FixedEmbedder(vec![0.0, 0.0, 0.0]),
        llm,
    )
    .expect("config is valid")
}

#[tokio::test]
async fn full_protocol_produces_resolved_verdict() {
    let index = default_index();
    let llm = Arc::new(MockChatGenerator::with_responses(vec![
        Ok("The statement is true, per Source #1 and Source #2.".to_string()),
        Ok("- Probability True: 80%\n- Probability False: 10%\n- Probability Undecided: 10%"
            .to_string()),
    ]));

    let verifier = verifier(
        report_corpus(),
        Arc::clone(&index),
        Arc::clone(&llm),
        Config::default(),
    );

    let outcome = verifier
        .verify("Grid capacity grew last year", &[], 2)
        .await
        .expect("no local faults");

    let verdict = outcome.verdict().expect("protocol completed");
    assert_eq!(verdict.probability_true, 80);
    assert_eq!(verdict.probability_false, 10);
    assert_eq!(verdict.probability_undecided, 10);
    assert_eq!(verdict.is_likely_true, Some(true));
    assert!(!verdict.low_confidence);

    // max_sources = 2 keeps only the two nearest chunks, in rank order.
    assert_eq!(verdict.sources.len(), 2);
    assert_eq!(verdict.sources[&1].title, "Grid Report");
    assert_eq!(verdict.sources[&2].title, "EV Outlook");

    // Citations in the analysis resolve to markdown links.
    assert!(
        verdict
            .statement_analysis
            .contains("[Grid Report](http://example.org/Grid-Report)")
    );
    assert!(
        verdict
            .statement_analysis
            .contains("[EV Outlook](http://example.org/EV-Outlook)")
    );

    // Both passes went out, carrying statement and evidence.
    let requests = llm.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].1.contains("Grid capacity grew last year"));
    assert!(requests[0].1.contains("Source #1"));
    assert!(requests[0].1.contains("Title: Grid Report"));
    assert!(!requests[0].1.contains("Source #3"));
    assert!(requests[1].1.contains("### Your Previous Conclusion:"));
    assert!(requests[1].1.contains("The statement is true, per Source #1"));
    assert_eq!(index.search_count(), 1);
}

#[tokio::test]
async fn type_filter_excluding_all_chunks_skips_search_and_llm() {
    let index = default_index();
    let llm = Arc::new(MockChatGenerator::new());

    let verifier = verifier(
        report_corpus(),
        Arc::clone(&index),
        Arc::clone(&llm),
        Config::default(),
    );

    let outcome = verifier
        .verify("anything", &[PublicationType::News], 5)
        .await
        .expect("no local faults");

    assert!(matches!(outcome, VerifyOutcome::InsufficientEvidence));
    assert_eq!(index.search_count(), 0);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn empty_filter_falls_back_to_configured_allow_list() {
    let index = default_index();
    let llm = Arc::new(MockChatGenerator::new());

    let config = Config {
        allowed_types: vec![PublicationType::News],
        ..Default::default()
    };
    let verifier = verifier(report_corpus(), Arc::clone(&index), Arc::clone(&llm), config);

    let outcome = verifier
        .verify("anything", &[], 5)
        .await
        .expect("no local faults");

    assert!(matches!(outcome, VerifyOutcome::InsufficientEvidence));
    assert_eq!(index.search_count(), 0);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn unrankable_hits_yield_insufficient_evidence_after_search() {
    let corpus = Arc::new(
        CorpusStore::from_parts(
            vec!["chunk".to_string()],
            vec![meta("Undated", PublicationType::Report, "Unknown Date")],
        )
        .expect("corpus parts are consistent"),
    );
    let mut index = MockVectorIndex::new();
    index.insert(0, vec![0.1, 0.0, 0.0]);
    let index = Arc::new(index);
    let llm = Arc::new(MockChatGenerator::new());

    let verifier = verifier(corpus, Arc::clone(&index), Arc::clone(&llm), Config::default());

    let outcome = verifier
        .verify("anything", &[], 5)
        .await
        .expect("no local faults");

    assert!(matches!(outcome, VerifyOutcome::InsufficientEvidence));
    assert_eq!(index.search_count(), 1);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn permanent_provider_failure_degrades_without_retry() {
    let index = default_index();
    let llm = Arc::new(MockChatGenerator::with_responses(vec![Err(
        veracity::LlmError::Provider {
            message: "invalid api key".to_string(),
        },
    )]));

    let verifier = verifier(
        report_corpus(),
        Arc::clone(&index),
        Arc::clone(&llm),
        Config::default(),
    );

    let outcome = verifier
        .verify("anything", &[], 5)
        .await
        .expect("no local faults");

    match outcome {
        VerifyOutcome::ProviderUnavailable { message } => {
            assert!(message.contains("invalid api key"));
        }
        other => panic!("expected ProviderUnavailable, got {other:?}"),
    }
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn transient_failure_is_retried_and_protocol_completes() {
    let index = default_index();
    let llm = Arc::new(MockChatGenerator::with_responses(vec![
        Err(veracity::LlmError::Transport {
            message: "connection reset".to_string(),
        }),
        Ok("The statement is false. See Source #1.".to_string()),
        Ok("- Probability True: 5%\n- Probability False: 85%\n- Probability Undecided: 10%"
            .to_string()),
    ]));

    let verifier = verifier(
        report_corpus(),
        Arc::clone(&index),
        Arc::clone(&llm),
        Config::default(),
    );

    let outcome = verifier
        .verify("anything", &[], 5)
        .await
        .expect("no local faults");

    let verdict = outcome.verdict().expect("protocol completed after retry");
    assert_eq!(verdict.is_likely_true, Some(false));
    assert_eq!(llm.call_count(), 3);
}

#[tokio::test]
async fn recent_document_outranks_equally_similar_old_one() {
    let corpus = Arc::new(
        CorpusStore::from_parts(
            vec!["old evidence".to_string(), "fresh evidence".to_string()],
            vec![
                meta("Old Briefing", PublicationType::Briefing, "Jan 03, 2015, 10:15:00 AM"),
                meta("Fresh Briefing", PublicationType::Briefing, "Jan 03, 2025, 10:15:00 AM"),
            ],
        )
        .expect("corpus parts are consistent"),
    );
    // Equidistant from the query vector; only recency separates them.
    let mut index = MockVectorIndex::new();
    index.insert(0, vec![1.0, 0.0, 0.0]);
    index.insert(1, vec![-1.0, 0.0, 0.0]);
    let index = Arc::new(index);

    let llm = Arc::new(MockChatGenerator::with_responses(vec![
        Ok("Analysis.".to_string()),
        Ok("- Probability True: 60%\n- Probability False: 20%\n- Probability Undecided: 20%"
            .to_string()),
    ]));

    let verifier = verifier(corpus, Arc::clone(&index), Arc::clone(&llm), Config::default());

    let outcome = verifier
        .verify("anything", &[], 5)
        .await
        .expect("no local faults");

    let verdict = outcome.verdict().expect("protocol completed");
    assert_eq!(verdict.sources[&1].title, "Fresh Briefing");
    assert_eq!(verdict.sources[&2].title, "Old Briefing");
}

#[tokio::test]
async fn malformed_probability_breakdown_is_flagged_not_fatal() {
    let index = default_index();
    let llm = Arc::new(MockChatGenerator::with_responses(vec![
        Ok("Analysis citing Source #1.".to_string()),
        Ok("I would rather not commit to numbers.".to_string()),
    ]));

    let verifier = verifier(
        report_corpus(),
        Arc::clone(&index),
        Arc::clone(&llm),
        Config::default(),
    );

    let outcome = verifier
        .verify("anything", &[], 5)
        .await
        .expect("no local faults");

    let verdict = outcome.verdict().expect("protocol completed");
    assert!(verdict.low_confidence);
    assert_eq!(verdict.probability_undecided, 100);
    assert_eq!(verdict.is_likely_true, None);
}

#[tokio::test]
async fn requested_source_cap_is_clamped_to_configured_ceiling() {
    let index = default_index();
    let llm = Arc::new(MockChatGenerator::with_responses(vec![
        Ok("Analysis.".to_string()),
        Ok("- Probability True: 60%\n- Probability False: 20%\n- Probability Undecided: 20%"
            .to_string()),
    ]));

    let config = Config {
        max_sources: 1,
        ..Default::default()
    };
    let verifier = verifier(report_corpus(), Arc::clone(&index), Arc::clone(&llm), config);

    let outcome = verifier
        .verify("anything", &[], 10)
        .await
        .expect("no local faults");

    let verdict = outcome.verdict().expect("protocol completed");
    assert_eq!(verdict.sources.len(), 1);
    assert_eq!(verdict.sources[&1].title, "Grid Report");
}
