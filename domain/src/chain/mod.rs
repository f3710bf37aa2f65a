//! The cost-ordered fallback chain: tiers, model specs and the escalation
//! heuristics that drive the orchestrator's state machine.

pub mod fallback;
pub mod heuristics;
pub mod model;

pub use fallback::FallbackChain;
pub use model::{ModelId, ModelSpec, ModelTier};
