//! Client-side request pacing
//!
//! A governor token bucket shared by every clone of an `HttpClient`, so page
//! fetches and profile calls draw from one budget.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Requests per second and bucket size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Sustained request rate
    #[serde(default = "default_rate")]
    pub requests_per_second: u32,
    /// Requests allowed back to back before pacing starts
    #[serde(default = "default_rate")]
    pub burst_size: u32,
}

fn default_rate() -> u32 {
    10
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new(default_rate(), default_rate())
    }
}

impl RateLimiterConfig {
    /// Create a config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    fn quota(&self) -> Quota {
        let per_second = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::per_second(per_second).allow_burst(burst)
    }
}

/// Shared token bucket; zero settings are raised to one
#[derive(Clone)]
pub struct RateLimiter(Arc<Governor<NotKeyed, InMemoryState, DefaultClock>>);

impl RateLimiter {
    /// Create a limiter from its config
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self(Arc::new(Governor::direct(config.quota())))
    }

    /// Wait for the next request slot
    pub async fn wait(&self) {
        self.0.until_ready().await;
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RateLimiter")
    }
}
