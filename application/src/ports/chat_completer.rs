//! Chat completion port
//!
//! Defines the single shared interface for talking to language-model
//! providers. Every pipeline component that needs a completion — the tier
//! orchestrator and the web-search fallback alike — depends on this trait
//! rather than on any provider adapter directly.

use async_trait::async_trait;
use canonica_domain::{ModelId, ModelSpec};
use thiserror::Error;

/// Errors that can occur during a completion call.
///
/// Every variant is transient from the pipeline's point of view: the caller
/// logs it and moves to the next model or tier, never retries in place.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Sampling options for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

impl From<&ModelSpec> for CompletionOptions {
    fn from(spec: &ModelSpec) -> Self {
        Self {
            temperature: spec.temperature,
            max_tokens: spec.max_tokens,
        }
    }
}

/// Gateway for chat completion.
///
/// This port defines how the application layer communicates with model
/// providers. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Run one completion against the given model and return the raw text.
    async fn complete(
        &self,
        model: &ModelId,
        system_prompt: &str,
        user_prompt: &str,
        options: CompletionOptions,
    ) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use canonica_domain::ModelTier;

    #[test]
    fn test_options_from_spec() {
        let spec = ModelSpec::new("gpt-5-mini", "GPT-5 Mini", ModelTier::Primary)
            .with_temperature(0.0)
            .with_max_tokens(2048);
        let options = CompletionOptions::from(&spec);
        assert_eq!(options.temperature, 0.0);
        assert_eq!(options.max_tokens, 2048);
    }
}
