//! Probability extraction from the pass-2 response.
//!
//! The protocol asks for exactly three lines of the form
//! `- Probability True: XX%`. Models mostly comply; when they do not, each
//! value is extracted independently and missing values fall back to
//! defaults biased toward "no decision evidenced". Parsing is the
//! resilience fallback, not the contract — the degradation is surfaced via
//! `low_confidence`.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Truthfulness;

static TRUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Probability True:\s*(\d+)%").expect("valid regex"));
static FALSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Probability False:\s*(\d+)%").expect("valid regex"));
static UNDECIDED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Probability Undecided:\s*(\d+)%").expect("valid regex"));

/// Parsed probability breakdown, percentages in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbabilityEstimate {
    pub p_true: u8,
    pub p_false: u8,
    pub p_undecided: u8,
    /// Set when any of the three lines was missing or malformed.
    pub low_confidence: bool,
}

impl ProbabilityEstimate {
    /// Extracts the three labeled percentages from free text.
    ///
    /// Missing true/false default to 0; missing undecided defaults to 100.
    pub fn parse(text: &str) -> Self {
        let p_true = extract(&TRUE_RE, text);
        let p_false = extract(&FALSE_RE, text);
        let p_undecided = extract(&UNDECIDED_RE, text);

        let low_confidence = p_true.is_none() || p_false.is_none() || p_undecided.is_none();

        Self {
            p_true: p_true.unwrap_or(0),
            p_false: p_false.unwrap_or(0),
            p_undecided: p_undecided.unwrap_or(100),
            low_confidence,
        }
    }

    /// Derives the tri-state call. Order matters: a true-majority wins,
    /// then a false-majority, else undecided — so 50/50 is undecided and
    /// {50, 60} is false.
    pub fn verdict(&self) -> Truthfulness {
        if self.p_true > 50 {
            Truthfulness::True
        } else if self.p_false > 50 {
            Truthfulness::False
        } else {
            Truthfulness::Undecided
        }
    }
}

fn extract(re: &Regex, text: &str) -> Option<u8> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .map(|v| v.min(100) as u8)
}
