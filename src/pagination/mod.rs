//! Pagination module
//!
//! Cursor pagination over the search endpoint.
//!
//! # Overview
//!
//! - [`PageFetcher`] executes one page request ([`HttpPageFetcher`] over HTTP)
//! - [`PaginationEngine`] drives a fetcher through a session, advancing the
//!   `search_after` cursor and enforcing the effective maximum
//! - [`SessionState`] is the per-session state the engine owns
//!
//! The engine runs as a single producer feeding a bounded channel; the
//! consumer side is [`crate::stream::ResultStream`].

mod engine;
mod fetcher;
mod types;

pub use engine::PaginationEngine;
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use types::{
    PaginationConfig, Phase, SessionState, SessionSummary, StopReason, DEFAULT_CHANNEL_CAPACITY,
    DEFAULT_MAX_RESULTS, DEFAULT_PAGE_SIZE,
};
