//! The fallback chain — an immutable, injected configuration value.
//!
//! The chain holds one ordered priority list of models per tier. It is
//! constructed once (defaults, or from config) and injected into the
//! orchestrator's constructor; nothing in the pipeline mutates it and there
//! is no ambient/global chain.

use super::model::{ModelSpec, ModelTier};
use serde::{Deserialize, Serialize};

/// Ordered model priority lists for every tier of the fallback chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackChain {
    pub primary: Vec<ModelSpec>,
    pub secondary: Vec<ModelSpec>,
    pub reasoning: Vec<ModelSpec>,
    pub web_processing: Vec<ModelSpec>,
}

impl Default for FallbackChain {
    /// The static default chain, cheapest first.
    fn default() -> Self {
        Self {
            primary: vec![
                ModelSpec::new("gpt-5-mini", "GPT-5 Mini", ModelTier::Primary),
            ],
            secondary: vec![
                ModelSpec::new("claude-haiku-4.5", "Claude Haiku 4.5", ModelTier::Secondary),
                ModelSpec::new("gemini-3-flash", "Gemini 3 Flash", ModelTier::Secondary),
            ],
            reasoning: vec![
                ModelSpec::new("claude-sonnet-4.5", "Claude Sonnet 4.5", ModelTier::Reasoning)
                    .with_max_tokens(4096),
            ],
            web_processing: vec![
                ModelSpec::new("gpt-5-mini", "GPT-5 Mini", ModelTier::WebProcessing)
                    .with_max_tokens(2048),
            ],
        }
    }
}

impl FallbackChain {
    /// Models configured for a tier, in priority order.
    pub fn models_for(&self, tier: ModelTier) -> &[ModelSpec] {
        match tier {
            ModelTier::Primary => &self.primary,
            ModelTier::Secondary => &self.secondary,
            ModelTier::Reasoning => &self.reasoning,
            ModelTier::WebProcessing => &self.web_processing,
        }
    }

    pub fn with_primary(mut self, models: Vec<ModelSpec>) -> Self {
        self.primary = models;
        self
    }

    pub fn with_secondary(mut self, models: Vec<ModelSpec>) -> Self {
        self.secondary = models;
        self
    }

    pub fn with_reasoning(mut self, models: Vec<ModelSpec>) -> Self {
        self.reasoning = models;
        self
    }

    pub fn with_web_processing(mut self, models: Vec<ModelSpec>) -> Self {
        self.web_processing = models;
        self
    }
}
