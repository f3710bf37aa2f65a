//! Rate limiter port
//!
//! Consulted exactly once, before any tier runs. The limiting algorithm is
//! the adapter's concern; the pipeline only asks and records.

/// Request budget gate in front of the whole pipeline.
pub trait RateLimiterPort: Send + Sync {
    /// Whether one more resolution may start now.
    fn can_proceed(&self) -> bool;

    /// Record that a resolution was started.
    fn record_request(&self);
}

/// Null object: never limits. Used in tests and when limiting is disabled.
pub struct UnlimitedRateLimiter;

impl RateLimiterPort for UnlimitedRateLimiter {
    fn can_proceed(&self) -> bool {
        true
    }

    fn record_request(&self) {}
}
