use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::SourceRef;

/// Tri-state truthfulness call derived from the probability breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Truthfulness {
    True,
    False,
    Undecided,
}

impl Truthfulness {
    /// `Some(true)` / `Some(false)` for a decided call, `None` otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Truthfulness::True => Some(true),
            Truthfulness::False => Some(false),
            Truthfulness::Undecided => None,
        }
    }
}

impl std::fmt::Display for Truthfulness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Truthfulness::True => write!(f, "true"),
            Truthfulness::False => write!(f, "false"),
            Truthfulness::Undecided => write!(f, "undecided"),
        }
    }
}

/// Final structured verdict for one verified statement.
///
/// `sources` maps the 1-based source numbers shown to the model to their
/// title/link pairs. The probability fields are independent percentages
/// and need not sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Pass-1 analysis with "Source #n" references resolved to links.
    pub statement_analysis: String,
    pub sources: BTreeMap<u32, SourceRef>,
    pub probability_true: u8,
    pub probability_false: u8,
    pub probability_undecided: u8,
    /// `None` means undecided.
    pub is_likely_true: Option<bool>,
    /// Set when the probability lines could not be parsed and defaults
    /// were substituted.
    pub low_confidence: bool,
}

/// Outcome of one verification request.
///
/// Provider failures are a variant rather than an error: callers always
/// get a well-formed outcome and can still distinguish failure kinds.
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    /// Evidence was found and the protocol completed.
    Verdict(Verdict),
    /// No usable evidence; the LLM protocol was never started.
    InsufficientEvidence,
    /// The text-generation provider failed after retry.
    ProviderUnavailable { message: String },
}

impl VerifyOutcome {
    /// Returns the verdict, if the protocol completed.
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            VerifyOutcome::Verdict(v) => Some(v),
            _ => None,
        }
    }
}
