//! Tavily web search adapter.
//!
//! Implements the scoped-search collaborator against the
//! [Tavily Search API](https://tavily.com). The allow/deny domain lists from
//! the caller map directly onto `include_domains`/`exclude_domains`; ranking
//! is entirely the provider's business.

use async_trait::async_trait;
use canonica_application::ports::web_search::{
    SearchError, SearchHit, SearchOptions, SearchResponse, WebSearchPort,
};
use canonica_domain::resolution::host;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const TAVILY_API_URL: &str = "https://api.tavily.com/search";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Web search adapter backed by Tavily.
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.into(),
            api_url: TAVILY_API_URL.to_string(),
        }
    }

    /// Point the adapter at a different endpoint (tests, proxies).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    score: f64,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

fn request_body(api_key: &str, query: &str, options: &SearchOptions) -> serde_json::Value {
    serde_json::json!({
        "api_key": api_key,
        "query": query,
        "search_depth": options.search_depth,
        "max_results": options.max_results,
        "include_domains": options.allow_domains,
        "exclude_domains": options.deny_domains,
    })
}

fn to_response(payload: TavilyResponse) -> SearchResponse {
    let results: Vec<SearchHit> = payload
        .results
        .into_iter()
        .map(|r| {
            let domain = host::host_of(&r.url).unwrap_or_default();
            SearchHit {
                title: r.title,
                url: r.url,
                content: r.content,
                domain,
                score: r.score,
            }
        })
        .collect();
    let has_results = !results.is_empty();
    SearchResponse {
        results,
        has_results,
    }
}

#[async_trait]
impl WebSearchPort for TavilySearch {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, SearchError> {
        debug!(query, max_results = options.max_results, "tavily search");

        let response = self
            .client
            .post(&self.api_url)
            .json(&request_body(&self.api_key, query, options))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    SearchError::Connection(e.to_string())
                } else {
                    SearchError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::RequestFailed(format!(
                "search endpoint returned {}",
                response.status()
            )));
        }

        let payload: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        Ok(to_response(payload))
    }
}
