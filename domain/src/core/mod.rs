//! Core domain primitives: errors and shared constants.

pub mod error;

pub use error::{DomainError, MIN_QUERY_LEN};
