//! HTTP client module
//!
//! Provides the transport used by page fetches and the profile call.
//!
//! # Features
//!
//! - **Single-shot requests**: failures surface immediately, nothing is retried
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Ordered query pairs**: repeated keys such as `tag` are preserved
//! - **Authentication**: Bearer credentials from the auth module

mod client;
mod rate_limit;

pub use client::{
    decode_json, default_user_agent, HttpClient, HttpClientConfig, HttpClientConfigBuilder,
    RequestConfig,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
