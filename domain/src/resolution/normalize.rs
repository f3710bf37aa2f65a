//! Response normalization for entity resolution.
//!
//! Models are asked for JSON but return it wrapped in markdown fences,
//! surrounded by prose, or as a bare object instead of the documented
//! `{"companies": [...]}` envelope. This module turns that raw text into a
//! candidate list — or `None`, which callers treat identically to "the model
//! found nothing". Pure text processing: no I/O, never panics.

use crate::resolution::candidate::CandidateRecord;
use serde_json::Value;
use tracing::warn;

/// Parse raw model output into a candidate list.
///
/// Strategy:
/// 1. Strip common code-fence wrappers (```` ```json ```` / ```` ``` ````).
/// 2. Attempt a direct JSON parse.
/// 3. On failure, retry the substring between the first `{` and last `}`.
///
/// Accepted shapes:
/// - `{"companies": [...]}` — passes through.
/// - A bare single record `{"name": ..., "websiteUrl": ...}` — wrapped into
///   a one-element list (with a logged warning).
///
/// Anything else yields `None`. A `None` is not an error — it is
/// indistinguishable from the model returning an empty result.
pub fn parse(raw_text: &str, query: &str) -> Option<Vec<CandidateRecord>> {
    let stripped = strip_code_fences(raw_text);

    let value = serde_json::from_str::<Value>(stripped)
        .ok()
        .or_else(|| extract_braced(stripped).and_then(|s| serde_json::from_str::<Value>(s).ok()))?;

    match value {
        Value::Object(ref obj) if obj.contains_key("companies") => {
            let companies = obj.get("companies")?.as_array()?;
            Some(
                companies
                    .iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect(),
            )
        }
        Value::Object(ref obj) if obj.contains_key("name") => {
            warn!(
                query,
                "model returned a bare record instead of a companies array; wrapping"
            );
            let candidate: CandidateRecord = serde_json::from_value(value.clone()).ok()?;
            Some(vec![candidate])
        }
        _ => None,
    }
}

/// Remove a leading ```` ```json ````/```` ``` ```` fence and trailing fence.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .trim()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Extract the substring between the first `{` and the last `}`.
fn extract_braced(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"{"companies": [{"name": "Acme", "websiteUrl": "https://acme.io", "domain": "acme.io", "confidence": 0.9}]}"#;

    #[test]
    fn test_parse_envelope() {
        let candidates = parse(ENVELOPE, "acme").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Acme");
        assert_eq!(candidates[0].confidence, 0.9);
    }

    #[test]
    fn test_parse_fenced_equals_unfenced() {
        let fenced = format!("```json\n{}\n```", ENVELOPE);
        assert_eq!(parse(&fenced, "acme"), parse(ENVELOPE, "acme"));
    }

    #[test]
    fn test_parse_bare_record_wraps_to_single_element() {
        let bare = r#"{"name": "Acme", "websiteUrl": "https://acme.io", "domain": "acme.io"}"#;
        let wrapped = format!(r#"{{"companies": [{}]}}"#, bare);
        assert_eq!(parse(bare, "acme"), parse(&wrapped, "acme"));
        assert_eq!(parse(bare, "acme").unwrap().len(), 1);
    }

    #[test]
    fn test_parse_with_surrounding_prose() {
        let text = format!("Here is what I found:\n\n{}\n\nLet me know!", ENVELOPE);
        let candidates = parse(&text, "acme").unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse("I could not find anything.", "acme"), None);
        assert_eq!(parse("", "acme"), None);
        assert_eq!(parse("[1, 2, 3]", "acme"), None);
        assert_eq!(parse(r#"{"results": []}"#, "acme"), None);
    }

    #[test]
    fn test_parse_empty_companies_is_empty_not_none() {
        let candidates = parse(r#"{"companies": []}"#, "acme").unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_parse_never_panics_on_arbitrary_input() {
        for raw in ["{", "}", "{}{}", "```", "```json", "{\"companies\": {}}", "null"] {
            let _ = parse(raw, "q");
        }
    }
}
