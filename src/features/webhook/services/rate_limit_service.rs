//! Rate Limit Service - per-caller admission control for the webhook

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests left in the current window (0 when denied).
    pub remaining: u32,
    /// Seconds until the current window ends, floored at 1.
    pub retry_after_secs: u64,
}

/// Admission control keyed by caller identity.
///
/// The handler only depends on this trait; the in-process counter below is the
/// single-instance default, and a shared store (Redis, Postgres) can stand in
/// behind the same seam when the service runs replicated.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn check(&self, key: &str) -> RateLimitDecision;
}

struct WindowEntry {
    window_start: Instant,
    count: u32,
}

/// Fixed-window counter backed by an in-process map.
///
/// The first request from a key opens its window; requests past
/// `max_requests` within `window` are denied until the window expires, at
/// which point the next request opens a fresh one.
pub struct FixedWindowRateLimiter {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

/// Expired keys are swept once the map reaches this size.
const MAX_TRACKED_KEYS: usize = 10_000;

impl FixedWindowRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Count a request from `key` against the window containing `now`.
    pub async fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut entries = self.entries.lock().await;

        if entries.len() >= MAX_TRACKED_KEYS && !entries.contains_key(key) {
            let window = self.window;
            entries.retain(|_, entry| now.duration_since(entry.window_start) < window);
        }

        let entry = entries.entry(key.to_string()).or_insert(WindowEntry {
            window_start: now,
            count: 0,
        });

        if now.duration_since(entry.window_start) >= self.window {
            entry.window_start = now;
            entry.count = 0;
        }

        entry.count += 1;

        let allowed = entry.count <= self.max_requests;
        let remaining = self.max_requests.saturating_sub(entry.count);
        let elapsed = now.duration_since(entry.window_start);
        let retry_after_secs = self.window.saturating_sub(elapsed).as_secs().max(1);

        RateLimitDecision {
            allowed,
            remaining,
            retry_after_secs,
        }
    }
}

#[async_trait]
impl RateLimiter for FixedWindowRateLimiter {
    async fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now()).await
    }
}
