//! Domain layer for canonica
//!
//! This crate contains the core business logic of the entity resolution
//! pipeline. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Fallback chain
//!
//! Resolution runs through a cost-ordered chain of model tiers
//! (primary → secondary → reasoning → web-processing). Each tier holds an
//! ordered priority list of models; the first result that passes the
//! sufficiency predicate wins and stops escalation.
//!
//! ## Candidate vs canonical records
//!
//! - **Candidate**: unvalidated, ephemeral output of one model response.
//! - **Canonical**: persisted, deduplicated, keyed by normalized website
//!   host; only ever enriched, never downgraded.

pub mod chain;
pub mod core;
pub mod prompt;
pub mod resolution;

// Re-export commonly used types
pub use chain::{FallbackChain, ModelId, ModelSpec, ModelTier};
pub use core::{DomainError, MIN_QUERY_LEN};
pub use resolution::{CandidateRecord, CanonicalRecord};
