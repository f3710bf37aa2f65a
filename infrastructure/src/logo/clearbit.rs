//! Clearbit logo fetcher.
//!
//! Pulls a company logo by domain from the public Clearbit logo endpoint
//! and hands it back base64-encoded for the image store. A missing logo
//! is a normal outcome, not an error.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use canonica_application::ports::logo::{LogoError, LogoFetcherPort};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

const DEFAULT_LOGO_URL: &str = "https://logo.clearbit.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct ClearbitLogoFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ClearbitLogoFetcher {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_LOGO_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn logo_url(&self, domain: &str) -> String {
        format!("{}/{domain}", self.base_url)
    }
}

impl Default for ClearbitLogoFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogoFetcherPort for ClearbitLogoFetcher {
    async fn download_logo(&self, domain: &str) -> Result<Option<String>, LogoError> {
        let url = self.logo_url(domain);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LogoError::DownloadFailed(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(domain, "no logo available");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(LogoError::DownloadFailed(format!(
                "logo endpoint returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LogoError::DownloadFailed(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(STANDARD.encode(&bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_url_joins_domain() {
        let fetcher = ClearbitLogoFetcher::with_base_url("https://logos.example.com/");
        assert_eq!(
            fetcher.logo_url("acme.io"),
            "https://logos.example.com/acme.io"
        );
    }
}
