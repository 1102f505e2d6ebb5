//! Evidence context assembly.
//!
//! Turns the ranked, capped result list into the numbered evidence block
//! shown to the model, plus the source map used later to resolve the
//! model's "Source #n" references back into titles and links. Numbering is
//! 1-based and contiguous; block order matches rank order exactly, so the
//! numbers the model cites are the numbers the resolver knows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ranking::RankedSource;

/// Title and link of one cited source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

/// Numbered evidence shown to the model.
#[derive(Debug, Clone)]
pub struct EvidenceContext {
    /// 1-based source number to title/link, in rank order.
    pub sources: BTreeMap<u32, SourceRef>,
    /// The combined snippet blocks, ready to embed in a prompt.
    pub combined: String,
}

impl EvidenceContext {
    /// Number of sources in the context.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if no sources are present.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Builds the evidence context from at most `max_sources` ranked results.
///
/// Returns `None` when there is nothing to show — the caller must treat
/// that as insufficient evidence and skip the LLM protocol entirely.
pub fn assemble(ranked: &[RankedSource], max_sources: usize) -> Option<EvidenceContext> {
    if ranked.is_empty() || max_sources == 0 {
        return None;
    }

    let mut sources = BTreeMap::new();
    let mut blocks = Vec::new();

    for (i, source) in ranked.iter().take(max_sources).enumerate() {
        let number = (i + 1) as u32;
        sources.insert(
            number,
            SourceRef {
                title: source.title.clone(),
                url: source.url.clone(),
            },
        );
        blocks.push(format!(
            "Source #{number}\nTitle: {}\nURL: {}\nSnippet: {}\n",
            source.title, source.url, source.snippet
        ));
    }

    Some(EvidenceContext {
        sources,
        combined: blocks.join("\n\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::PublicationType;

    fn ranked(n: usize) -> Vec<RankedSource> {
        (0..n)
            .map(|i| RankedSource {
                chunk_id: i as u64,
                title: format!("Report {i}"),
                url: format!("http://example.org/{i}"),
                pdf_url: format!("http://example.org/{i}.pdf"),
                snippet: format!("snippet {i}"),
                similarity_score: 0.9,
                date_weight: 1.0,
                weighted_score: 0.9,
                publication_type: PublicationType::Report,
                publication_date: "January 01, 2025".to_string(),
                summary: "s".to_string(),
            })
            .collect()
    }

    #[test]
    fn empty_input_yields_no_context() {
        assert!(assemble(&[], 5).is_none());
        assert!(assemble(&ranked(2), 0).is_none());
    }

    #[test]
    fn numbering_is_one_based_and_contiguous_in_rank_order() {
        let ctx = assemble(&ranked(3), 5).expect("context");

        assert_eq!(ctx.len(), 3);
        let numbers: Vec<u32> = ctx.sources.keys().copied().collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(ctx.sources[&1].title, "Report 0");
        assert_eq!(ctx.sources[&3].title, "Report 2");

        let first = ctx.combined.find("Source #1").unwrap();
        let second = ctx.combined.find("Source #2").unwrap();
        let third = ctx.combined.find("Source #3").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn max_sources_bounds_the_context() {
        let ctx = assemble(&ranked(4), 2).expect("context");

        assert_eq!(ctx.len(), 2);
        assert!(ctx.combined.contains("Source #2"));
        assert!(!ctx.combined.contains("Source #3"));
    }

    #[test]
    fn blocks_carry_title_url_and_snippet() {
        let ctx = assemble(&ranked(1), 5).expect("context");

        assert!(ctx.combined.contains("Title: Report 0"));
        assert!(ctx.combined.contains("URL: http://example.org/0"));
        assert!(ctx.combined.contains("Snippet: snippet 0"));
    }
}
