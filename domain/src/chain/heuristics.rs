//! Sufficiency and escalation heuristics.
//!
//! Pure predicates driving the fallback state machine: when to stop
//! escalating (`is_sufficient`) and whether the reasoning tier is worth its
//! cost (`reasoning_needed`). No I/O, no state.

use crate::resolution::candidate::CandidateRecord;

/// Confidence at which a candidate is trusted without sources.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Query keywords that signal a disambiguation/comparison question.
const DISAMBIGUATION_KEYWORDS: &[&str] = &[
    "which",
    "what",
    "difference",
    "compare",
    "versus",
    "vs",
    "better",
    "similar",
    "alternative",
    "like",
    "related",
];

/// A candidate set is sufficient iff at least one candidate has all three
/// identity fields AND is either confident enough or backed by sources.
///
/// First-sufficient-wins is the whole point of the chain: the orchestrator
/// stops at the first tier/model whose result passes this predicate.
pub fn is_sufficient(candidates: &[CandidateRecord]) -> bool {
    candidates.iter().any(|c| {
        c.is_complete() && (c.confidence >= CONFIDENCE_THRESHOLD || !c.sources.is_empty())
    })
}

/// Decide whether the reasoning tier should run after primary and secondary
/// both failed sufficiency.
///
/// True when any of:
/// - the query contains a disambiguation keyword (case-insensitive, whole
///   token);
/// - the query has ≥3 whitespace tokens or contains `/`, `&` or `+`;
/// - the last non-empty secondary result is missing, or has any candidate
///   below the confidence threshold;
/// - any candidate in that result has no sources.
pub fn reasoning_needed(query: &str, last_secondary: Option<&[CandidateRecord]>) -> bool {
    let lowered = query.to_ascii_lowercase();
    if lowered
        .split(|c: char| c.is_whitespace() || c == '?' || c == ',' || c == '.')
        .any(|token| DISAMBIGUATION_KEYWORDS.contains(&token))
    {
        return true;
    }

    if query.split_whitespace().count() >= 3 || query.contains(['/', '&', '+']) {
        return true;
    }

    match last_secondary {
        None => true,
        Some(candidates) => candidates
            .iter()
            .any(|c| c.confidence < CONFIDENCE_THRESHOLD || c.sources.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(confidence: f64, sources: &[&str]) -> CandidateRecord {
        CandidateRecord {
            name: "Acme".to_string(),
            website_url: "https://acme.io".to_string(),
            domain: "acme.io".to_string(),
            confidence,
            sources: sources.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sufficient_on_confidence_alone() {
        assert!(is_sufficient(&[candidate(0.9, &[])]));
    }

    #[test]
    fn test_sufficient_on_sources_alone() {
        assert!(is_sufficient(&[candidate(0.1, &["crunchbase"])]));
    }

    #[test]
    fn test_insufficient_low_confidence_no_sources() {
        assert!(!is_sufficient(&[candidate(0.4, &[])]));
    }

    #[test]
    fn test_insufficient_when_identity_incomplete() {
        let mut c = candidate(0.95, &["crunchbase"]);
        c.domain = String::new();
        assert!(!is_sufficient(&[c]));
        assert!(!is_sufficient(&[]));
    }

    #[test]
    fn test_reasoning_on_disambiguation_keyword() {
        let result = [candidate(0.9, &["crunchbase"])];
        assert!(reasoning_needed("LinkedIn vs Indeed", Some(&result)));
        assert!(reasoning_needed("which ATS is this", Some(&result)));
    }

    #[test]
    fn test_no_reasoning_for_simple_confident_query() {
        let result = [candidate(0.9, &["crunchbase"])];
        assert!(!reasoning_needed("Acme Corp", Some(&result)));
    }

    #[test]
    fn test_reasoning_on_structural_complexity() {
        let none: Option<&[CandidateRecord]> = Some(&[]);
        let result = [candidate(0.9, &["crunchbase"])];
        assert!(reasoning_needed("Tata Consultancy Services Ltd", Some(&result)));
        assert!(reasoning_needed("Stripe / Paystack", Some(&result)));
        assert!(reasoning_needed("AT&T", Some(&result)));
        // An empty last result has nothing suspicious in it
        assert!(!reasoning_needed("Acme", none));
    }

    #[test]
    fn test_reasoning_on_weak_last_result() {
        assert!(reasoning_needed("Acme", Some(&[candidate(0.4, &["x"])])));
        assert!(reasoning_needed("Acme", Some(&[candidate(0.9, &[])])));
        assert!(reasoning_needed("Acme", None));
    }

    #[test]
    fn test_keyword_is_whole_token_not_substring() {
        // "likely" contains "like" but is not a disambiguation token,
        // and the query is otherwise simple
        let result = [candidate(0.9, &["crunchbase"])];
        assert!(!reasoning_needed("LikelyCo", Some(&result)));
    }
}
