//! Fixed-window request rate limiter.
//!
//! Counts resolution requests inside a sliding window and refuses new work
//! once the cap is hit. The gate is consulted once per resolution, before
//! any model call, so a refusal costs nothing.

use canonica_application::ports::rate_limiter::RateLimiterPort;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct FixedWindowRateLimiter {
    max_requests: usize,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl FixedWindowRateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Drops timestamps that have aged out of the window.
    fn prune(&self, timestamps: &mut VecDeque<Instant>, now: Instant) {
        while let Some(front) = timestamps.front()
            && now.duration_since(*front) >= self.window
        {
            timestamps.pop_front();
        }
    }
}

impl RateLimiterPort for FixedWindowRateLimiter {
    fn can_proceed(&self) -> bool {
        let mut timestamps = self.timestamps.lock().unwrap();
        self.prune(&mut timestamps, Instant::now());
        timestamps.len() < self.max_requests
    }

    fn record_request(&self) {
        let mut timestamps = self.timestamps.lock().unwrap();
        let now = Instant::now();
        self.prune(&mut timestamps, now);
        timestamps.push_back(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_cap() {
        let limiter = FixedWindowRateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.can_proceed());
        limiter.record_request();
        assert!(limiter.can_proceed());
        limiter.record_request();
        assert!(!limiter.can_proceed());
    }

    #[test]
    fn test_window_expiry_frees_capacity() {
        let limiter = FixedWindowRateLimiter::new(1, Duration::from_millis(10));
        limiter.record_request();
        assert!(!limiter.can_proceed());
        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.can_proceed());
    }
}
