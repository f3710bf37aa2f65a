//! Web search fallback use case.
//!
//! The last tier of the chain: when every model tier failed sufficiency,
//! search the open web through a scoped provider and let a web-processing
//! model extract candidates from the snippets. Shares the [`ChatCompleter`]
//! capability with the orchestrator rather than reaching into it.

use crate::ports::chat_completer::{ChatCompleter, CompletionOptions};
use crate::ports::web_search::{SearchDepth, SearchOptions, SearchResponse, WebSearchPort};
use canonica_domain::prompt::{self, Snippet};
use canonica_domain::resolution::{integrity, normalize};
use canonica_domain::{CandidateRecord, ModelSpec};
use std::sync::Arc;
use tracing::{debug, warn};

/// Minimum provider relevance score for a search to count as useful.
pub const MIN_RELEVANCE: f64 = 0.3;

/// Keywords appended to the search query to pull enrichment-grade results.
const ENRICHMENT_KEYWORDS: &str = "funding valuation employees headquarters founded";

/// Reference vendors whose profiles rank well for company queries.
const REFERENCE_VENDORS: &str = "crunchbase pitchbook linkedin";

/// Trusted sources: registries, press, professional/financial data sites.
const ALLOW_DOMAINS: &[&str] = &[
    "crunchbase.com",
    "pitchbook.com",
    "linkedin.com",
    "bloomberg.com",
    "reuters.com",
    "techcrunch.com",
    "sec.gov",
    "dnb.com",
    "craft.co",
    "owler.com",
];

/// General social/video/encyclopedia sites — noise for entity resolution.
const DENY_DOMAINS: &[&str] = &[
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "x.com",
    "youtube.com",
    "tiktok.com",
    "wikipedia.org",
    "reddit.com",
];

/// Web-search-backed resolution fallback.
pub struct WebSearchFallback {
    search: Arc<dyn WebSearchPort>,
    completer: Arc<dyn ChatCompleter>,
}

impl WebSearchFallback {
    pub fn new(search: Arc<dyn WebSearchPort>, completer: Arc<dyn ChatCompleter>) -> Self {
        Self { search, completer }
    }

    /// Run the web fallback. Returns validated candidates, or `None` when
    /// the search was useless or no web-processing model produced any.
    /// Every failure degrades — this path never errors.
    pub async fn run(&self, query: &str, models: &[ModelSpec]) -> Option<Vec<CandidateRecord>> {
        let response = match self.search.search(&enrich_query(query), &scoped_options()).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "web search failed; skipping web tier");
                return None;
            }
        };

        if !is_useful(&response) {
            debug!(query, "web search returned no sufficiently relevant results");
            return None;
        }

        let snippets: Vec<Snippet> = response
            .results
            .iter()
            .map(|hit| Snippet {
                title: hit.title.clone(),
                url: hit.url.clone(),
                body: hit.content.clone(),
            })
            .collect();
        let system_prompt = prompt::web_augmented_system_prompt(query, &snippets);
        let user_prompt = prompt::resolution_user_prompt(query);

        for model in models {
            let raw = match self
                .completer
                .complete(&model.id, &system_prompt, &user_prompt, model.into())
                .await
            {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(model = %model.id, error = %e, "web-processing model failed");
                    continue;
                }
            };

            let Some(candidates) = normalize::parse(&raw, query) else {
                continue;
            };

            let attribution = format!("WebSearchProvider + {}", model.id);
            let validated = integrity::validate(candidates, &attribution);
            if !validated.is_empty() {
                return Some(validated);
            }
        }

        None
    }
}

/// Append enrichment keywords and reference-vendor names to the query.
pub fn enrich_query(query: &str) -> String {
    format!("{query} company {ENRICHMENT_KEYWORDS} {REFERENCE_VENDORS}")
}

/// A search is useful iff at least one result clears [`MIN_RELEVANCE`].
pub fn is_useful(response: &SearchResponse) -> bool {
    response.results.iter().any(|hit| hit.score > MIN_RELEVANCE)
}

fn scoped_options() -> SearchOptions {
    SearchOptions {
        max_results: prompt::MAX_SNIPPETS,
        search_depth: SearchDepth::Advanced,
        allow_domains: ALLOW_DOMAINS.iter().map(|d| d.to_string()).collect(),
        deny_domains: DENY_DOMAINS.iter().map(|d| d.to_string()).collect(),
    }
}
