//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types at the
//! composition root.

use canonica_domain::{FallbackChain, ModelSpec, ModelTier};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("provider api_base cannot be empty")]
    EmptyApiBase,

    #[error("limits.max_requests cannot be 0")]
    InvalidRequestCap,
}

/// Raw model provider configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the OpenAI-compatible chat endpoint
    pub api_base: String,
    /// API key; also read from `CANONICA_API_KEY` if unset
    pub api_key: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: None,
        }
    }
}

/// Raw web search configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// API key for the search provider; also `CANONICA_SEARCH_API_KEY`
    pub api_key: Option<String>,
}

/// Raw logo pipeline configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogoConfig {
    /// Disable logo fetching entirely
    pub enabled: bool,
    /// Directory where downloaded logos are stored
    pub directory: String,
}

impl Default for FileLogoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: ".canonica/logos".to_string(),
        }
    }
}

/// Raw rate limit configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    /// Maximum resolutions per window
    pub max_requests: usize,
    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        Self {
            max_requests: 30,
            window_seconds: 60,
        }
    }
}

/// Raw escalation chain overrides from TOML
///
/// Each field replaces the corresponding built-in tier when non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChainConfig {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub reasoning: Vec<String>,
    pub web_processing: Vec<String>,
}

impl FileChainConfig {
    /// Build the escalation chain, applying any configured overrides on
    /// top of the built-in defaults.
    pub fn to_chain(&self) -> FallbackChain {
        let mut chain = FallbackChain::default();
        if !self.primary.is_empty() {
            chain = chain.with_primary(Self::specs(&self.primary, ModelTier::Primary));
        }
        if !self.secondary.is_empty() {
            chain = chain.with_secondary(Self::specs(&self.secondary, ModelTier::Secondary));
        }
        if !self.reasoning.is_empty() {
            chain = chain.with_reasoning(Self::specs(&self.reasoning, ModelTier::Reasoning));
        }
        if !self.web_processing.is_empty() {
            chain = chain.with_web_processing(Self::specs(
                &self.web_processing,
                ModelTier::WebProcessing,
            ));
        }
        chain
    }

    fn specs(ids: &[String], tier: ModelTier) -> Vec<ModelSpec> {
        ids.iter().map(|id| ModelSpec::new(id, id, tier)).collect()
    }
}

/// Complete raw configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub provider: FileProviderConfig,
    pub search: FileSearchConfig,
    pub logos: FileLogoConfig,
    pub limits: FileLimitsConfig,
    pub chain: FileChainConfig,
}

impl FileConfig {
    /// Validate values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.api_base.trim().is_empty() {
            return Err(ConfigValidationError::EmptyApiBase);
        }
        if self.limits.max_requests == 0 {
            return Err(ConfigValidationError::InvalidRequestCap);
        }
        Ok(())
    }
}
