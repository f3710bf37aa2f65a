//! Model identifiers and per-tier model specifications.

use serde::{Deserialize, Serialize};

/// Opaque model identifier understood by the chat-completion provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ModelId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// One priority level in the fallback chain.
///
/// Closed variant set driving the escalation state machine — tiers are never
/// free-form strings. Ordering is cost order: each tier is only reached when
/// every cheaper tier failed to produce a sufficient result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelTier {
    Primary,
    Secondary,
    Reasoning,
    WebProcessing,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Primary => "primary",
            ModelTier::Secondary => "secondary",
            ModelTier::Reasoning => "reasoning",
            ModelTier::WebProcessing => "web-processing",
        }
    }

    /// Attribution label recorded in surviving candidates' sources.
    pub fn attribution(&self) -> &'static str {
        match self {
            ModelTier::Primary => "PrimaryTier",
            ModelTier::Secondary => "SecondaryTier",
            ModelTier::Reasoning => "ReasoningTier",
            ModelTier::WebProcessing => "WebProcessingTier",
        }
    }
}

impl std::fmt::Display for ModelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for one model within a tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub id: ModelId,
    pub display_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub tier: ModelTier,
}

impl ModelSpec {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, tier: ModelTier) -> Self {
        Self {
            id: ModelId::new(id),
            display_name: display_name.into(),
            temperature: 0.2,
            max_tokens: 1024,
            tier,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
