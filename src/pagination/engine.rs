//! Pagination engine
//!
//! Turns cursor-linked page fetches into one ordered, bounded sequence of
//! records pushed through a bounded channel.
//!
//! Per session:
//! 1. Resolve the effective maximum from the caller's maximum and the query's
//!    limit override.
//! 2. Fetch the first page and clamp the maximum to its reported total.
//! 3. Send records in page order until the page or the maximum runs out.
//! 4. Move the cursor to the last record's `updated` value, fetch the next
//!    page and continue from step 3.
//!
//! The session ends on the maximum, an empty or short page, a cursor that
//! would not move, a fetch error (sent as the final item), or a consumer that
//! went away.

use super::fetcher::PageFetcher;
use super::types::{PaginationConfig, SessionState, SessionSummary, StopReason};
use crate::error::Result;
use crate::model::Record;
use crate::query::SearchParams;
use crate::stream::ResultStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Drives a page fetcher through one search session at a time
#[derive(Debug, Clone)]
pub struct PaginationEngine<F> {
    fetcher: F,
    config: PaginationConfig,
}

impl<F: PageFetcher> PaginationEngine<F> {
    /// Create an engine
    pub fn new(fetcher: F, config: PaginationConfig) -> Self {
        Self { fetcher, config }
    }

    /// Engine configuration
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fresh session state for a search
    pub fn start_session(&self, params: &SearchParams, max_results: Option<usize>) -> SessionState {
        let effective_max = self.config.resolve_max(max_results, params.limit);
        SessionState::new(effective_max, params.cursor().map(String::from))
    }

    /// Run one session, sending records into `tx`
    ///
    /// Returns once the session has stopped. A fetch error is sent as the
    /// last item; records sent before it stay delivered.
    pub async fn run(
        &self,
        params: SearchParams,
        max_results: Option<usize>,
        tx: mpsc::Sender<Result<Record>>,
    ) -> SessionSummary {
        let mut params = params;
        let mut state = self.start_session(&params, max_results);
        debug!(
            "Starting search session: up to {} records, {} per page",
            state.effective_max(),
            self.config.page_size
        );

        let reason = self.drive(&mut params, &mut state, &tx).await;
        let summary = state.finish(reason);

        match reason {
            StopReason::FetchFailed => warn!(
                "Search stopped on a failed page after {} records",
                summary.emitted
            ),
            StopReason::CursorStalled => warn!(
                "Search stopped: cursor '{}' did not advance",
                summary.last_cursor.as_deref().unwrap_or_default()
            ),
            StopReason::ConsumerGone => debug!(
                "Search abandoned by consumer after {} records",
                summary.emitted
            ),
            _ => info!(
                "Search finished: {} records in {} pages ({:?})",
                summary.emitted, summary.pages_fetched, reason
            ),
        }
        summary
    }

    async fn drive(
        &self,
        params: &mut SearchParams,
        state: &mut SessionState,
        tx: &mpsc::Sender<Result<Record>>,
    ) -> StopReason {
        let page_size = self.config.page_size as usize;

        loop {
            if state.is_satisfied() {
                return StopReason::MaxReached;
            }

            state.begin_fetch();
            let query = params.render(self.config.page_size);

            // An abandoned consumer cancels the in-flight fetch
            let fetched = tokio::select! {
                biased;
                () = tx.closed() => return StopReason::ConsumerGone,
                result = self.fetcher.fetch_page(&query) => result,
            };

            let page = match fetched {
                Ok(page) => page,
                Err(e) => {
                    warn!("Page fetch failed: {e}");
                    // Nobody to tell if the consumer is already gone
                    let _ = tx.send(Err(e)).await;
                    return StopReason::FetchFailed;
                }
            };

            if state.observe_total(page.total) {
                debug!("Clamped to server total of {}", page.total);
            }

            if page.is_empty() {
                return StopReason::EmptyPage;
            }

            let page_len = page.len();
            let next_cursor = page.last_cursor().map(String::from);

            for record in page.records {
                if state.is_satisfied() {
                    break;
                }
                if tx.send(Ok(record)).await.is_err() {
                    return StopReason::ConsumerGone;
                }
                state.record_emitted();
            }

            if state.is_satisfied() {
                return StopReason::MaxReached;
            }

            if page_len < page_size {
                return StopReason::ShortPage;
            }

            let Some(cursor) = next_cursor else {
                return StopReason::EmptyPage;
            };
            if !state.advance_cursor(&cursor) {
                return StopReason::CursorStalled;
            }
            params.set_cursor(cursor);
        }
    }
}

impl<F: PageFetcher + 'static> PaginationEngine<F> {
    /// Run a session on a background task and stream its records
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self, params: SearchParams, max_results: Option<usize>) -> ResultStream {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let producer = tokio::spawn(async move { self.run(params, max_results, tx).await });
        ResultStream::new(rx, producer)
    }
}
