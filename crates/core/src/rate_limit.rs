//! Fixed-window token bucket rate limiter.
//!
//! Each key owns a bucket of `max` tokens. A request consumes one token; once
//! `window_ms` has elapsed since the last refill the bucket is reset to `max`
//! in one step (hard reset, so a full burst is allowed right after a window
//! boundary). State is process-local and lost on restart.
//!
//! Callers hold the limiter through [`RateLimitStore`] so a shared external
//! store can replace [`InMemoryRateLimiter`] without touching call sites.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{TimeZone, Utc};

use crate::types::Timestamp;

/// Outcome of a single limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// The configured maximum for the window.
    pub limit: u32,
    /// Tokens left after this call.
    pub remaining: u32,
    /// When the current window ends and the bucket refills.
    pub reset_at: Timestamp,
}

/// Storage seam for rate limit state.
#[async_trait::async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Consume one token for `key`, refilling first if the window elapsed.
    /// Never fails; an unknown key starts with a full bucket.
    async fn check_limit(&self, key: &str, window_ms: u64, max: u32) -> RateLimitDecision;
}

/// Build the limiter key for a request: `tenant:user:path`.
pub fn limit_key(tenant: &str, user: &str, path: &str) -> String {
    format!("{tenant}:{user}:{path}")
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: u32,
    last_refill_ms: i64,
    window_ms: u64,
}

/// In-process limiter backed by a mutex-guarded map.
///
/// The lock is held only for the bucket update, so check-and-decrement is
/// atomic for concurrent requests within one process.
#[derive(Debug, Default)]
pub struct InMemoryRateLimiter {
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`RateLimitStore::check_limit`] with an explicit clock.
    pub fn check_limit_at(
        &self,
        key: &str,
        window_ms: u64,
        max: u32,
        now: Timestamp,
    ) -> RateLimitDecision {
        let now_ms = now.timestamp_millis();
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            tokens: max,
            last_refill_ms: now_ms,
            window_ms,
        });

        let elapsed = now_ms.saturating_sub(bucket.last_refill_ms);
        if elapsed >= window_ms as i64 {
            bucket.tokens = max;
            bucket.last_refill_ms = now_ms;
        }
        bucket.window_ms = window_ms;

        let reset_ms = bucket.last_refill_ms.saturating_add(window_ms as i64);
        let reset_at = Utc
            .timestamp_millis_opt(reset_ms)
            .single()
            .unwrap_or(now);

        if bucket.tokens == 0 {
            return RateLimitDecision {
                allowed: false,
                limit: max,
                remaining: 0,
                reset_at,
            };
        }

        bucket.tokens -= 1;
        RateLimitDecision {
            allowed: true,
            limit: max,
            remaining: bucket.tokens,
            reset_at,
        }
    }

    /// Drop buckets whose window has already elapsed; they would be reset to
    /// full on their next use anyway. Returns the number removed.
    pub fn prune(&self, now: Timestamp) -> usize {
        let now_ms = now.timestamp_millis();
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());
        let before = buckets.len();
        buckets.retain(|_, b| now_ms.saturating_sub(b.last_refill_ms) < b.window_ms as i64);
        before - buckets.len()
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.buckets.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl RateLimitStore for InMemoryRateLimiter {
    async fn check_limit(&self, key: &str, window_ms: u64, max: u32) -> RateLimitDecision {
        self.check_limit_at(key, window_ms, max, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const WINDOW_MS: u64 = 60_000;

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn allows_up_to_max_then_rejects() {
        let limiter = InMemoryRateLimiter::new();
        let now = t0();

        for expected_remaining in (0..10).rev() {
            let d = limiter.check_limit_at("t:u:/cart", WINDOW_MS, 10, now);
            assert!(d.allowed);
            assert_eq!(d.remaining, expected_remaining);
            assert_eq!(d.limit, 10);
        }

        let d = limiter.check_limit_at("t:u:/cart", WINDOW_MS, 10, now);
        assert!(!d.allowed);
        assert_eq!(d.remaining, 0);
        assert_eq!(d.reset_at, now + Duration::milliseconds(WINDOW_MS as i64));
    }

    #[test]
    fn bucket_resets_after_window() {
        let limiter = InMemoryRateLimiter::new();
        let now = t0();
        for _ in 0..3 {
            limiter.check_limit_at("k", WINDOW_MS, 3, now);
        }
        assert!(!limiter.check_limit_at("k", WINDOW_MS, 3, now).allowed);

        // Still inside the window.
        let almost = now + Duration::milliseconds(WINDOW_MS as i64 - 1);
        assert!(!limiter.check_limit_at("k", WINDOW_MS, 3, almost).allowed);

        // Exactly at the boundary the bucket is full again.
        let later = now + Duration::milliseconds(WINDOW_MS as i64);
        let d = limiter.check_limit_at("k", WINDOW_MS, 3, later);
        assert!(d.allowed);
        assert_eq!(d.remaining, 2);
        assert_eq!(d.reset_at, later + Duration::milliseconds(WINDOW_MS as i64));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = InMemoryRateLimiter::new();
        let now = t0();
        assert!(limiter.check_limit_at("a", WINDOW_MS, 1, now).allowed);
        assert!(!limiter.check_limit_at("a", WINDOW_MS, 1, now).allowed);
        assert!(limiter.check_limit_at("b", WINDOW_MS, 1, now).allowed);
    }

    #[test]
    fn zero_max_always_rejects() {
        let limiter = InMemoryRateLimiter::new();
        let d = limiter.check_limit_at("k", WINDOW_MS, 0, t0());
        assert!(!d.allowed);
        assert_eq!(d.limit, 0);
    }

    #[test]
    fn prune_removes_only_expired_buckets() {
        let limiter = InMemoryRateLimiter::new();
        let now = t0();
        limiter.check_limit_at("old", 1_000, 5, now);
        limiter.check_limit_at("fresh", WINDOW_MS, 5, now);
        assert_eq!(limiter.len(), 2);

        let removed = limiter.prune(now + Duration::seconds(2));
        assert_eq!(removed, 1);
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn key_format() {
        assert_eq!(limit_key("t1", "u1", "/api/cart"), "t1:u1:/api/cart");
    }

    #[tokio::test]
    async fn trait_object_delegates_to_wall_clock() {
        let store: std::sync::Arc<dyn RateLimitStore> =
            std::sync::Arc::new(InMemoryRateLimiter::new());
        let d = store.check_limit("k", WINDOW_MS, 2).await;
        assert!(d.allowed);
        assert_eq!(d.remaining, 1);
    }
}
