//! Infrastructure layer for canonica
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logo;
pub mod providers;
pub mod ratelimit;
pub mod search;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logo::{ClearbitLogoFetcher, FileImageStore};
pub use providers::HttpChatCompleter;
pub use ratelimit::FixedWindowRateLimiter;
pub use search::TavilySearch;
pub use store::InMemoryCanonicalStore;
