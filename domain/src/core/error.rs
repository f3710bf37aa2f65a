//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Only the entry-point precondition surfaces from here; everything inside
/// the pipeline (provider failures, malformed responses, contamination
/// drops, persistence conflicts) degrades to fewer results, and the
/// rate-limit rejection is the orchestrator's own error.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Query too short: at least {min} characters required")]
    QueryTooShort { min: usize },
}

/// Minimum trimmed query length accepted by the pipeline entry point,
/// counted in characters.
pub const MIN_QUERY_LEN: usize = 4;
