//! Integrity validation — defense against cross-company data contamination.
//!
//! Models occasionally mix one company's fields into another's record
//! (typically when two companies share a parent, an acronym, or a domain).
//! Each candidate passes through ordered checks and is dropped at the first
//! failure; survivors keep their input order and gain an attribution entry
//! in `sources` naming the producing tier.

use crate::resolution::candidate::CandidateRecord;
use crate::resolution::host::{host_of, normalize_domain};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Corporate suffixes stripped from name tokens before matching.
const CORPORATE_SUFFIXES: &[&str] = &[
    "bio", "tech", "soft", "systems", "solutions", "corp", "inc", "llc",
];

/// Tokens that carry no identifying power: generic corporate words,
/// geographic qualifiers, and TLD fragments.
const STOPWORDS: &[&str] = &[
    // generic corporate
    "the", "and", "group", "holdings", "company", "companies", "global",
    "international", "enterprises", "industries", "labs", "technologies",
    "services", "partners", "ventures", "capital", "media", "digital",
    "software", "platform",
    // geographic
    "india", "usa", "america", "americas", "europe", "asia", "uk",
    // TLD words models leak into names
    "com", "net", "org", "www",
];

/// Known parent/subsidiary pairings: domain → name fragments that legitimise
/// it. Consulted only when a name yields no meaningful tokens.
const KNOWN_PAIRINGS: &[(&str, &[&str])] = &[
    ("bms.com", &["bristol", "myers", "squibb"]),
    ("jnj.com", &["johnson"]),
    ("gsk.com", &["glaxo", "smithkline"]),
    ("pg.com", &["procter", "gamble"]),
    ("ge.com", &["general", "electric", "ge"]),
];

/// Domains that models frequently misattribute to unrelated companies.
const MISATTRIBUTED_DOMAINS: &[&str] = &["bms.com", "abc.com", "corp.com"];

/// Why a candidate was dropped. Logged, never propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Incomplete,
    DuplicateDomain,
    DuplicateWebsite,
    Implausible,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::Incomplete => "missing name/websiteUrl/domain",
            DropReason::DuplicateDomain => "domain already claimed in this response",
            DropReason::DuplicateWebsite => "website already claimed in this response",
            DropReason::Implausible => "company name does not plausibly match domain",
        }
    }
}

/// Validate one response's candidates, appending `attribution` to the
/// sources of every survivor.
///
/// Single-pass sequential fold: the seen-domain/seen-website accumulators
/// live only for this call, so order of arrival decides which duplicate is
/// the original. Output order is input order minus drops.
pub fn validate(candidates: Vec<CandidateRecord>, attribution: &str) -> Vec<CandidateRecord> {
    let mut seen_domains: HashSet<String> = HashSet::new();
    let mut seen_websites: HashSet<String> = HashSet::new();
    let mut survivors = Vec::with_capacity(candidates.len());

    for mut candidate in candidates {
        if let Some(reason) = check(&mut candidate, &mut seen_domains, &mut seen_websites) {
            warn!(
                name = %candidate.name,
                domain = %candidate.domain,
                reason = reason.as_str(),
                "dropping contaminated candidate"
            );
            continue;
        }
        candidate.sources.push(attribution.to_string());
        survivors.push(candidate);
    }

    survivors
}

/// Run the ordered checks; returns the first failure, mutating the
/// candidate where a check auto-corrects instead of dropping.
fn check(
    candidate: &mut CandidateRecord,
    seen_domains: &mut HashSet<String>,
    seen_websites: &mut HashSet<String>,
) -> Option<DropReason> {
    // 1. Completeness
    if !candidate.is_complete() {
        return Some(DropReason::Incomplete);
    }

    // 2. Domain consistency — the URL host outranks the free-text field.
    // Runs before uniqueness so the corrected domain is what claims the key:
    // two candidates sharing a URL host must collide even when their
    // declared domains differ.
    let norm_domain = normalize_domain(&candidate.domain);
    let effective_domain = match host_of(&candidate.website_url) {
        Some(url_host) if url_host != norm_domain => {
            debug!(
                declared = %norm_domain,
                parsed = %url_host,
                "domain disagrees with websiteUrl host; correcting from URL"
            );
            candidate.domain = url_host.clone();
            url_host
        }
        Some(url_host) => url_host,
        None => norm_domain,
    };

    // 3. Batch uniqueness — first arrival claims the corrected keys
    let norm_website = candidate.website_url.trim().to_ascii_lowercase();
    if !seen_domains.insert(effective_domain.clone()) {
        return Some(DropReason::DuplicateDomain);
    }
    if !seen_websites.insert(norm_website) {
        return Some(DropReason::DuplicateWebsite);
    }

    // 4. Plausibility
    if !plausible(&candidate.name, &effective_domain) {
        return Some(DropReason::Implausible);
    }

    None
}

/// Decide whether `name` plausibly owns `domain`.
///
/// Permissive by design: false negatives cost more than occasional false
/// positives in a best-effort enrichment feature, so the no-signal case
/// defaults to accept.
pub fn plausible(name: &str, domain: &str) -> bool {
    let name_core = alphanumeric_core(name);
    let domain_core = alphanumeric_core(domain);
    if name_core.is_empty() || domain_core.is_empty() {
        return true;
    }

    // Direct core containment, either direction
    if name_core.contains(&domain_core) || domain_core.contains(&name_core) {
        return true;
    }

    // Fixed parent/subsidiary pairings outrank the token heuristic: acronym
    // domains (bms.com for Bristol Myers Squibb) never match on tokens.
    let norm = normalize_domain(domain);
    if let Some((_, fragments)) = KNOWN_PAIRINGS.iter().find(|(d, _)| *d == norm) {
        let lower = name.to_ascii_lowercase();
        if fragments.iter().any(|f| lower.contains(f)) {
            return true;
        }
    }

    let tokens = meaningful_tokens(name);
    if !tokens.is_empty() {
        return tokens.iter().any(|t| domain_core.contains(t.as_str()));
    }

    // No identifying tokens and no rule matched: deny-listed domains are
    // dropped, everything else is accepted
    if MISATTRIBUTED_DOMAINS.contains(&norm.as_str()) {
        return false;
    }

    true
}

/// Lowercased alphanumerics only.
fn alphanumeric_core(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Tokenize a company name and keep only identifying tokens: corporate
/// suffixes stripped, stopwords and short tokens discarded.
fn meaningful_tokens(name: &str) -> Vec<String> {
    name.to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter_map(strip_suffix)
        .filter(|t| t.len() > 2 && !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Drop a token that *is* a corporate suffix; trim one off the end of a
/// token that merely ends with one, keeping the remainder when substantial.
fn strip_suffix(token: &str) -> Option<String> {
    if token.is_empty() || CORPORATE_SUFFIXES.contains(&token) {
        return None;
    }
    for suffix in CORPORATE_SUFFIXES {
        if let Some(stem) = token.strip_suffix(suffix)
            && stem.len() >= 3
        {
            return Some(stem.to_string());
        }
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, url: &str, domain: &str) -> CandidateRecord {
        CandidateRecord {
            name: name.to_string(),
            website_url: url.to_string(),
            domain: domain.to_string(),
            confidence: 0.9,
            ..Default::default()
        }
    }

    #[test]
    fn test_incomplete_candidate_dropped() {
        let out = validate(
            vec![candidate("Acme", "", "acme.io"), candidate("Acme", "https://acme.io", "acme.io")],
            "Primary",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].website_url, "https://acme.io");
    }

    #[test]
    fn test_duplicate_domain_second_occurrence_dropped() {
        // Two same-response candidates claiming bms.com: the first arrival
        // wins; the 2seventy attribution would also fail plausibility.
        let out = validate(
            vec![
                candidate("Bristol Myers Squibb", "https://bms.com", "bms.com"),
                candidate("2seventy bio", "https://bms.com/2seventy", "bms.com"),
            ],
            "Primary",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Bristol Myers Squibb");
    }

    #[test]
    fn test_output_never_shares_normalized_keys() {
        let out = validate(
            vec![
                candidate("Acme", "https://acme.io", "acme.io"),
                candidate("Acme Two", "https://www.acme.io", "WWW.ACME.IO"),
                candidate("Other", "https://other.dev", "other.dev"),
            ],
            "Primary",
        );
        let domains: HashSet<_> = out.iter().map(|c| normalize_domain(&c.domain)).collect();
        assert_eq!(domains.len(), out.len());
    }

    #[test]
    fn test_domain_corrected_from_url_host() {
        let out = validate(
            vec![candidate("Acme", "https://acme.io", "wrong.example")],
            "Primary",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].domain, "acme.io");
    }

    #[test]
    fn test_corrected_domain_still_claims_uniqueness_key() {
        // Two candidates whose URLs share a host but whose declared domains
        // differ: the correction from the URL must happen before the
        // uniqueness check, so the second one collides and is dropped.
        let out = validate(
            vec![
                candidate("Acme", "https://acme.io/x", "wrongone.example"),
                candidate("Acme Two", "https://acme.io/y", "acme.io"),
            ],
            "Primary",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Acme");
        assert_eq!(out[0].domain, "acme.io");
    }

    #[test]
    fn test_attribution_appended_to_sources() {
        let out = validate(
            vec![candidate("Acme", "https://acme.io", "acme.io")],
            "WebSearchProvider + gpt-5-mini",
        );
        assert_eq!(
            out[0].sources,
            vec!["WebSearchProvider + gpt-5-mini".to_string()]
        );
    }

    #[test]
    fn test_plausibility_core_substring() {
        assert!(plausible("Naukri.com", "naukri.com"));
        assert!(plausible("Microsoft", "microsoft.com"));
    }

    #[test]
    fn test_plausibility_token_match() {
        // token "naukri" is a substring of naukricom
        assert!(plausible("Naukri India Group", "naukri.com"));
        // "2seventy" never appears in bmscom and no pairing legitimises it
        assert!(!plausible("2seventy bio", "bms.com"));
        // the acronym pairing table saves the legitimate owner
        assert!(plausible("Bristol Myers Squibb", "bms.com"));
    }

    #[test]
    fn test_plausibility_acronym_token_shortcut() {
        // "bms" survives tokenization and is a substring of the domain core
        assert!(plausible("BMS Inc", "bms.com"));
    }

    #[test]
    fn test_plausibility_known_pairing_branch() {
        // "GE Co" reduces to no meaningful tokens; the fixed pairing table
        // legitimises it for ge.com
        assert!(plausible("GE Co", "ge.com"));
        // No tokens, unknown to the pairing table, deny-listed domain
        assert!(!plausible("A.B.C. Co", "corp.com"));
    }

    #[test]
    fn test_plausibility_defaults_to_accept() {
        // No meaningful tokens, domain not in any rule table
        assert!(plausible("I.B.M.", "unrelated.example"));
    }

    #[test]
    fn test_output_length_never_increases() {
        let input = vec![
            candidate("Acme", "https://acme.io", "acme.io"),
            candidate("", "", ""),
        ];
        let len = input.len();
        assert!(validate(input, "Primary").len() <= len);
    }
}
