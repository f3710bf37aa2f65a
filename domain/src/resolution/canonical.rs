//! Canonical record — the persisted, deduplicated entity.

use crate::resolution::candidate::CandidateRecord;
use crate::resolution::host::{canonical_host, normalize_domain};
use crate::resolution::merge;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted company/platform record, unique per normalized website host.
///
/// Identity key is [`canonical_host`] of the website URL (scheme + host,
/// lowercased, `www.` stripped); `domain` is a secondary lookup key.
/// Records are created on first successful resolution and only ever
/// enriched afterwards — merges never downgrade a populated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Identity key: normalized scheme+host of the website URL.
    pub canonical_host: String,
    pub name: String,
    pub website_url: String,
    pub domain: String,
    pub description: Option<String>,
    pub industries: Vec<String>,
    pub headquarters: Option<String>,
    pub employee_count: Option<String>,
    pub founders: Vec<String>,
    pub leadership: Vec<String>,
    pub linkedin_url: Option<String>,
    pub crunchbase_url: Option<String>,
    pub total_funding: Option<String>,
    pub last_funding_round: Option<String>,
    pub valuation: Option<String>,
    pub is_public: Option<bool>,
    pub ticker: Option<String>,
    pub sources: Vec<String>,
    pub confidence: f64,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CanonicalRecord {
    /// Promote a validated candidate into a new canonical record.
    ///
    /// Returns `None` when no canonical host can be derived from the
    /// candidate's website URL — such a candidate cannot be keyed and is
    /// not persistable.
    pub fn from_candidate(candidate: &CandidateRecord) -> Option<Self> {
        let host = canonical_host(&candidate.website_url)?;
        let now = Utc::now();
        Some(Self {
            canonical_host: host,
            name: candidate.name.clone(),
            website_url: candidate.website_url.clone(),
            domain: normalize_domain(&candidate.domain),
            description: merge::sanitize_text(candidate.description.as_deref()),
            industries: candidate.industries.clone(),
            headquarters: merge::sanitize_text(candidate.headquarters.as_deref()),
            employee_count: merge::sanitize_count(candidate.employee_count.as_deref()),
            founders: candidate.founders.clone(),
            leadership: candidate.leadership.clone(),
            linkedin_url: merge::sanitize_text(candidate.linkedin_url.as_deref()),
            crunchbase_url: merge::sanitize_text(candidate.crunchbase_url.as_deref()),
            total_funding: merge::sanitize_text(candidate.total_funding.as_deref()),
            last_funding_round: merge::sanitize_text(candidate.last_funding_round.as_deref()),
            valuation: merge::sanitize_text(candidate.valuation.as_deref()),
            is_public: candidate.is_public,
            ticker: merge::sanitize_text(candidate.ticker.as_deref()),
            sources: candidate.sources.clone(),
            confidence: candidate.confidence,
            logo_url: None,
            created_at: now,
            updated_at: now,
        })
    }
}
