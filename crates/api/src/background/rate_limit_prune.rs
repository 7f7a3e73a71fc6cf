//! Periodic removal of expired rate limit buckets.
//!
//! Without pruning the limiter map keeps one entry per key ever seen.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use platter_core::rate_limit::InMemoryRateLimiter;

/// How often the prune job runs.
pub const PRUNE_INTERVAL: Duration = Duration::from_secs(300);

/// Run the prune loop forever. Abort the task handle to stop it.
pub async fn run(limiter: Arc<InMemoryRateLimiter>, every: Duration) {
    tracing::info!(interval_secs = every.as_secs(), "Rate limit prune job started");

    let mut interval = tokio::time::interval(every);
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;
        let removed = limiter.prune(Utc::now());
        if removed > 0 {
            tracing::info!(removed, remaining = limiter.len(), "Pruned rate limit buckets");
        } else {
            tracing::debug!("Rate limit prune: nothing to remove");
        }
    }
}
