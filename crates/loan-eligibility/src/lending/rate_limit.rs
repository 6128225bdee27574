use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

/// Outcome of counting one request against a client's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after_secs: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Per-client request budget owned by the HTTP layer.
pub trait RateLimiter: Send + Sync {
    /// Count a request from `key` made at `now` and report whether it may proceed.
    fn check(&self, key: &str, now: DateTime<Utc>) -> RateLimitDecision;
    fn reset(&self, key: &str);
    fn reset_all(&self);
}

/// Sliding-window limiter that remembers the timestamp of each accepted request.
#[derive(Debug)]
pub struct SlidingWindowRateLimiter {
    max_requests: u32,
    window: Duration,
    requests: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
}

impl SlidingWindowRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: Mutex::new(HashMap::new()),
        }
    }

    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::seconds(60))
    }

    /// Requests currently counted against `key`.
    pub fn usage(&self, key: &str, now: DateTime<Utc>) -> u32 {
        let cutoff = now - self.window;
        self.lock()
            .get(key)
            .map(|stamps| stamps.iter().filter(|stamp| **stamp > cutoff).count() as u32)
            .unwrap_or(0)
    }

    /// Drop clients whose window has fully elapsed.
    pub fn cleanup_expired(&self, now: DateTime<Utc>) {
        let cutoff = now - self.window;
        self.lock()
            .retain(|_, stamps| stamps.back().map_or(false, |latest| *latest > cutoff));
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, VecDeque<DateTime<Utc>>>> {
        // Counters stay usable after a panicking holder; worst case is a miscount.
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RateLimiter for SlidingWindowRateLimiter {
    fn check(&self, key: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let cutoff = now - self.window;
        let mut requests = self.lock();
        let stamps = requests.entry(key.to_string()).or_default();

        while stamps.front().map_or(false, |oldest| *oldest <= cutoff) {
            stamps.pop_front();
        }

        if stamps.len() as u32 >= self.max_requests {
            let retry_after_secs = stamps
                .front()
                .map(|oldest| (*oldest + self.window - now).num_seconds().max(1) as u64)
                .unwrap_or(1);
            return RateLimitDecision::Limited { retry_after_secs };
        }

        stamps.push_back(now);
        RateLimitDecision::Allowed {
            remaining: self.max_requests - stamps.len() as u32,
        }
    }

    fn reset(&self, key: &str) {
        self.lock().remove(key);
    }

    fn reset_all(&self) {
        self.lock().clear();
    }
}

/// Limiter that admits everything; used when limiting is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnlimitedRateLimiter;

impl RateLimiter for UnlimitedRateLimiter {
    fn check(&self, _key: &str, _now: DateTime<Utc>) -> RateLimitDecision {
        RateLimitDecision::Allowed {
            remaining: u32::MAX,
        }
    }

    fn reset(&self, _key: &str) {}

    fn reset_all(&self) {}
}
