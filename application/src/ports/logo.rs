//! Logo collaborator ports
//!
//! Two boundaries: downloading a logo for a domain (base64 payload) and
//! uploading an image to storage. The pipeline decides *when* to refresh a
//! logo; the adapters decide *how* bytes move.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the logo collaborators. Always degraded, never propagated.
#[derive(Error, Debug)]
pub enum LogoError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

/// Fetch a company logo by domain.
#[async_trait]
pub trait LogoFetcherPort: Send + Sync {
    /// Returns the logo as a base64 string, or `None` when the domain has
    /// no logo (a valid outcome, not an error).
    async fn download_logo(&self, domain: &str) -> Result<Option<String>, LogoError>;
}

/// Persist an image and return its public URL.
#[async_trait]
pub trait ImageStorePort: Send + Sync {
    async fn upload_image(&self, base64_data: &str, key_prefix: &str)
    -> Result<String, LogoError>;
}
