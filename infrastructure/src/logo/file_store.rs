//! Filesystem image store.
//!
//! Decodes a base64 payload and writes it under a configured directory,
//! returning the file path as the stored image URL. Stands in for an
//! object store when running locally.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use canonica_application::ports::logo::{ImageStorePort, LogoError};
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs;

pub struct FileImageStore {
    directory: PathBuf,
}

impl FileImageStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn file_name(key_prefix: &str) -> String {
        let safe: String = key_prefix
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '-' })
            .collect();
        format!("{safe}-{}.png", Utc::now().timestamp())
    }
}

#[async_trait]
impl ImageStorePort for FileImageStore {
    async fn upload_image(
        &self,
        base64_data: &str,
        key_prefix: &str,
    ) -> Result<String, LogoError> {
        let bytes = STANDARD
            .decode(base64_data)
            .map_err(|e| LogoError::UploadFailed(format!("invalid base64 payload: {e}")))?;

        fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| LogoError::UploadFailed(e.to_string()))?;

        let path = self.directory.join(Self::file_name(key_prefix));
        fs::write(&path, bytes)
            .await
            .map_err(|e| LogoError::UploadFailed(e.to_string()))?;

        Ok(path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileImageStore::new(dir.path());

        let payload = STANDARD.encode(b"logo-bytes");
        let url = store.upload_image(&payload, "acme.io").await.unwrap();

        let written = tokio::fs::read(&url).await.unwrap();
        assert_eq!(written, b"logo-bytes");
        assert!(url.contains("acme-io"));
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_base64() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileImageStore::new(dir.path());

        let err = store.upload_image("not base64!!", "acme.io").await;
        assert!(matches!(err, Err(LogoError::UploadFailed(_))));
    }
}
