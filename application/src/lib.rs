//! Application layer for canonica
//!
//! This crate contains the resolution use cases and the port definitions
//! their collaborators implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    canonical_store::{CanonicalStorePort, StoreError},
    chat_completer::{ChatCompleter, CompletionError, CompletionOptions},
    logo::{ImageStorePort, LogoError, LogoFetcherPort},
    rate_limiter::{RateLimiterPort, UnlimitedRateLimiter},
    web_search::{SearchDepth, SearchError, SearchHit, SearchOptions, SearchResponse, WebSearchPort},
};
pub use use_cases::merge_record::RecordMerger;
pub use use_cases::resolve_company::{ResolveCompanyUseCase, ResolveError, ResolveOutput};
pub use use_cases::web_fallback::WebSearchFallback;
