// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # hypothesis-client
//!
//! A read-only client for the Hypothesis annotation search API.
//!
//! The search endpoint returns at most 200 records per request and pages with
//! a `search_after` cursor. This crate turns that into one lazy, ordered
//! stream of records bounded by a caller-chosen maximum.
//!
//! ## Features
//!
//! - **Query model**: tag, user, group, URI and full-text filters
//! - **Cursor pagination**: follows `search_after` until the maximum, the
//!   server total, or an empty page
//! - **Streaming**: records arrive as they are fetched; dropping the stream
//!   stops the background fetcher
//! - **Degraded success**: a failed page ends the stream with an error after
//!   the records already delivered
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use hypothesis_client::{Client, SearchParams};
//!
//! #[tokio::main]
//! async fn main() -> hypothesis_client::Result<()> {
//!     let params = SearchParams::new().tag("media").group("__world__");
//!     let client = Client::new(std::env::var("H_TOKEN").unwrap_or_default(), params, 500)?;
//!
//!     let mut stream = client.search_all();
//!     while let Some(record) = stream.next().await {
//!         let record = record?;
//!         println!("{} {}", record.updated, record.exact_quote());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   RenderedQuery   ┌────────────────┐    HTTP GET
//! │ SearchParams │ ────────────────► │ HttpPageFetcher│ ─────────────► /api/search
//! └──────────────┘                   └───────┬────────┘
//!                                            │ Page
//!                                  ┌─────────▼─────────┐  mpsc   ┌──────────────┐
//!                                  │ PaginationEngine  │ ──────► │ ResultStream │
//!                                  │ (producer task)   │         │ (consumer)   │
//!                                  └───────────────────┘         └──────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Request credentials
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Search query model
pub mod query;

/// Annotation records and API responses
pub mod model;

/// Cursor pagination engine
pub mod pagination;

/// Consumer-side result streams
pub mod stream;

/// Client configuration
pub mod config;

/// High-level client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use model::{Page, Profile, Record, Selector};
pub use pagination::{PageFetcher, PaginationConfig, PaginationEngine, SessionSummary, StopReason};
pub use query::SearchParams;
pub use stream::{ResultStream, SearchOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
