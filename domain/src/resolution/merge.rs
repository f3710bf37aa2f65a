//! Field-level merge rules for canonical records.
//!
//! A canonical record improves monotonically: an incoming field overwrites
//! the stored one only when it is present (after sanitization) and actually
//! different. Absent or garbage input never erases stored data.

use crate::resolution::candidate::CandidateRecord;
use crate::resolution::canonical::CanonicalRecord;
use crate::resolution::host::normalize_domain;
use chrono::Utc;

/// Sanitize a free-text field: empty and literal "unknown" (any case)
/// collapse to `None`.
pub fn sanitize_text(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        return None;
    }
    Some(trimmed.to_string())
}

/// Sanitize a count-like field (employee counts, funding totals).
///
/// Models return free-form ranges ("51-200", "~3,000 employees"), so the
/// cleaned textual form is kept — but a value with no digit at all is
/// garbage and becomes `None` rather than being stored.
pub fn sanitize_count(value: Option<&str>) -> Option<String> {
    let text = sanitize_text(value)?;
    if text.chars().any(|c| c.is_ascii_digit()) {
        Some(text)
    } else {
        None
    }
}

/// Merge a validated candidate into an existing canonical record.
///
/// Returns `true` when anything changed (the caller persists only then).
/// Updates `updated_at` as part of any change.
pub fn merge_candidate(existing: &mut CanonicalRecord, candidate: &CandidateRecord) -> bool {
    let mut changed = false;

    changed |= merge_str(&mut existing.name, &candidate.name);
    changed |= merge_str(&mut existing.website_url, &candidate.website_url);
    changed |= merge_str(&mut existing.domain, &normalize_domain(&candidate.domain));
    changed |= merge_opt(
        &mut existing.description,
        sanitize_text(candidate.description.as_deref()),
    );
    changed |= merge_vec(&mut existing.industries, &candidate.industries);
    changed |= merge_opt(
        &mut existing.headquarters,
        sanitize_text(candidate.headquarters.as_deref()),
    );
    changed |= merge_opt(
        &mut existing.employee_count,
        sanitize_count(candidate.employee_count.as_deref()),
    );
    changed |= merge_vec(&mut existing.founders, &candidate.founders);
    changed |= merge_vec(&mut existing.leadership, &candidate.leadership);
    changed |= merge_opt(
        &mut existing.linkedin_url,
        sanitize_text(candidate.linkedin_url.as_deref()),
    );
    changed |= merge_opt(
        &mut existing.crunchbase_url,
        sanitize_text(candidate.crunchbase_url.as_deref()),
    );
    changed |= merge_opt(
        &mut existing.total_funding,
        sanitize_text(candidate.total_funding.as_deref()),
    );
    changed |= merge_opt(
        &mut existing.last_funding_round,
        sanitize_text(candidate.last_funding_round.as_deref()),
    );
    changed |= merge_opt(
        &mut existing.valuation,
        sanitize_text(candidate.valuation.as_deref()),
    );
    changed |= merge_opt(&mut existing.is_public, candidate.is_public);
    changed |= merge_opt(
        &mut existing.ticker,
        sanitize_text(candidate.ticker.as_deref()),
    );
    changed |= merge_vec(&mut existing.sources, &candidate.sources);

    if candidate.confidence > 0.0 && candidate.confidence != existing.confidence {
        existing.confidence = candidate.confidence;
        changed = true;
    }

    if changed {
        existing.updated_at = Utc::now();
    }
    changed
}

fn merge_str(existing: &mut String, incoming: &str) -> bool {
    let trimmed = incoming.trim();
    if !trimmed.is_empty() && trimmed != existing {
        *existing = trimmed.to_string();
        return true;
    }
    false
}

fn merge_opt<T: PartialEq>(existing: &mut Option<T>, incoming: Option<T>) -> bool {
    if let Some(value) = incoming
        && existing.as_ref() != Some(&value)
    {
        *existing = Some(value);
        return true;
    }
    false
}

fn merge_vec(existing: &mut Vec<String>, incoming: &[String]) -> bool {
    if !incoming.is_empty() && existing != incoming {
        *existing = incoming.to_vec();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::canonical::CanonicalRecord;

    fn base_candidate() -> CandidateRecord {
        CandidateRecord {
            name: "Acme".to_string(),
            website_url: "https://acme.io".to_string(),
            domain: "acme.io".to_string(),
            description: Some("Roadrunner logistics".to_string()),
            confidence: 0.8,
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_text_unknown() {
        assert_eq!(sanitize_text(Some("Unknown")), None);
        assert_eq!(sanitize_text(Some("  ")), None);
        assert_eq!(sanitize_text(Some("ok")), Some("ok".to_string()));
        assert_eq!(sanitize_text(None), None);
    }

    #[test]
    fn test_sanitize_count_requires_digit() {
        assert_eq!(sanitize_count(Some("51-200")), Some("51-200".to_string()));
        assert_eq!(sanitize_count(Some("lots of people")), None);
        assert_eq!(sanitize_count(Some("UNKNOWN")), None);
    }

    #[test]
    fn test_merge_identical_candidate_is_noop() {
        let candidate = base_candidate();
        let mut record = CanonicalRecord::from_candidate(&candidate).unwrap();
        assert!(!merge_candidate(&mut record, &candidate));
    }

    #[test]
    fn test_merge_updates_only_present_and_different() {
        let candidate = base_candidate();
        let mut record = CanonicalRecord::from_candidate(&candidate).unwrap();

        let mut enriched = base_candidate();
        enriched.headquarters = Some("Phoenix, AZ".to_string());
        enriched.description = None; // absent — must not erase

        assert!(merge_candidate(&mut record, &enriched));
        assert_eq!(record.headquarters, Some("Phoenix, AZ".to_string()));
        assert_eq!(record.description, Some("Roadrunner logistics".to_string()));
    }

    #[test]
    fn test_merge_never_stores_garbage_counts() {
        let candidate = base_candidate();
        let mut record = CanonicalRecord::from_candidate(&candidate).unwrap();

        let mut junk = base_candidate();
        junk.employee_count = Some("unknown".to_string());
        assert!(!merge_candidate(&mut record, &junk));
        assert_eq!(record.employee_count, None);
    }
}
