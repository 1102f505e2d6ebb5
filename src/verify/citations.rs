//! Citation resolution.
//!
//! The model is told to cite evidence as "Source #n"; rendering wants
//! titles and links instead. Rewrites run longest-pattern-first per source
//! ("Source #n", then "Source#n", then bare "#n") so an already-rewritten
//! span is never mangled again, and highest-numbered source first so "#1"
//! never eats the prefix of "#10". The bare "#n" rule is a best-effort
//! heuristic: an unrelated "#n" in the analysis text would also be
//! rewritten.

use std::collections::BTreeMap;

use crate::context::SourceRef;

/// Replaces "Source #n" style references with `[title](url)` links.
///
/// Pure transformation: the input is never mutated in place.
pub fn resolve_citations(text: &str, sources: &BTreeMap<u32, SourceRef>) -> String {
    let mut resolved = text.to_string();

    for (number, source) in sources.iter().rev() {
        let link = format!("[{}]({})", source.title, source.url);
        for pattern in [
            format!("Source #{number}"),
            format!("Source#{number}"),
            format!("#{number}"),
        ] {
            resolved = resolved.replace(&pattern, &link);
        }
    }

    resolved
}
