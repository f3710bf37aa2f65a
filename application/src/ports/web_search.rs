//! Web search port
//!
//! Boundary to the external scoped-search collaborator. The pipeline only
//! builds queries and applies the usefulness predicate; ranking internals
//! belong to the provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the search collaborator. Treated as transient by callers.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Search effort requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

/// Options for one scoped search call.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_results: usize,
    pub search_depth: SearchDepth,
    /// Trusted-domain allow-list (registries, press, financial data sites).
    pub allow_domains: Vec<String>,
    /// Deny-list (general social/video/encyclopedia sites).
    pub deny_domains: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 10,
            search_depth: SearchDepth::Advanced,
            allow_domains: Vec::new(),
            deny_domains: Vec::new(),
        }
    }
}

/// One search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub content: String,
    pub domain: String,
    /// Provider relevance score in [0, 1].
    pub score: f64,
}

/// A full search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub has_results: bool,
}

/// Scoped external search collaborator.
#[async_trait]
pub trait WebSearchPort: Send + Sync {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, SearchError>;
}
