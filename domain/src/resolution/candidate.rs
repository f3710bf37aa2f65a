//! Candidate record — the ephemeral output of one provider response.
//!
//! Candidates are deserialized straight from model JSON, which is unreliable:
//! numbers arrive as strings, booleans arrive as `"true"`, fields go missing.
//! Deserialization is therefore maximally tolerant — a field that cannot be
//! understood becomes `None` rather than failing the whole record.

use serde::{Deserialize, Deserializer, Serialize};

/// An unvalidated company/platform record extracted from one model response.
///
/// Lives for a single resolution cycle. Validated candidates are merged into
/// [`CanonicalRecord`](super::canonical::CanonicalRecord)s by the record
/// merger; unvalidated ones never leave the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateRecord {
    pub name: String,
    pub website_url: String,
    pub domain: String,
    pub description: Option<String>,
    pub industries: Vec<String>,
    pub headquarters: Option<String>,
    /// Free-text from models ("51-200", "about 3,000"); sanitized at merge.
    pub employee_count: Option<String>,
    pub founders: Vec<String>,
    pub leadership: Vec<String>,
    pub linkedin_url: Option<String>,
    pub crunchbase_url: Option<String>,
    pub total_funding: Option<String>,
    pub last_funding_round: Option<String>,
    pub valuation: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_public: Option<bool>,
    pub ticker: Option<String>,
    /// Ordered provenance strings; the validator appends tier attribution.
    pub sources: Vec<String>,
    #[serde(deserialize_with = "lenient_confidence")]
    pub confidence: f64,
}

impl CandidateRecord {
    /// A candidate is complete when the three identity fields are present.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.website_url.trim().is_empty()
            && !self.domain.trim().is_empty()
    }
}

/// Accept `true`/`false`, `"true"`/`"false"` (any case), anything else → None.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => Some(b),
        Some(serde_json::Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Accept a number or a numeric string; non-finite and garbage become 0.0.
fn lenient_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|c| c.is_finite()).unwrap_or(0.0))
}
