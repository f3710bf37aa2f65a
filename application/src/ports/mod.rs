//! Port definitions (interfaces for external collaborators)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod canonical_store;
pub mod chat_completer;
pub mod logo;
pub mod rate_limiter;
pub mod web_search;
