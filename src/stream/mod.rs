//! Result streams
//!
//! The consumer side of a search session. A [`ResultStream`] yields records
//! lazily in server order; dropping or closing it stops the producer.
//!
//! A failed page shows up as a single trailing `Err` item after the records
//! that were already delivered. [`ResultStream::collect_outcome`] gathers
//! both halves into a [`SearchOutcome`].

use crate::error::{Error, Result};
use crate::model::Record;
use crate::pagination::SessionSummary;
use futures::{Stream, StreamExt};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

pin_project! {
    /// Lazy, ordered stream of search results
    #[derive(Debug)]
    pub struct ResultStream {
        #[pin]
        inner: ReceiverStream<Result<Record>>,
        producer: JoinHandle<SessionSummary>,
        received: usize,
    }
}

impl ResultStream {
    /// Wrap the receiving end of a session and its producer task
    pub fn new(rx: mpsc::Receiver<Result<Record>>, producer: JoinHandle<SessionSummary>) -> Self {
        Self {
            inner: ReceiverStream::new(rx),
            producer,
            received: 0,
        }
    }

    /// Records yielded so far
    pub fn received(&self) -> usize {
        self.received
    }

    /// Stop the producer without dropping the stream
    ///
    /// Records already buffered can still be read.
    pub fn close(&mut self) {
        self.inner.close();
    }

    /// Close the stream and wait for the producer's summary
    pub async fn finish(mut self) -> Result<SessionSummary> {
        self.inner.close();
        self.producer
            .await
            .map_err(|e| Error::Other(format!("search task failed: {e}")))
    }

    /// Drain the stream, keeping records delivered before any failure
    pub async fn collect_outcome(mut self) -> SearchOutcome {
        let mut records = Vec::new();
        let mut error = None;

        while let Some(item) = self.next().await {
            match item {
                Ok(record) => records.push(record),
                Err(e) => error = Some(e),
            }
        }

        let summary = match self.finish().await {
            Ok(summary) => Some(summary),
            Err(e) => {
                error.get_or_insert(e);
                None
            }
        };

        SearchOutcome {
            records,
            error,
            summary,
        }
    }
}

impl Stream for ResultStream {
    type Item = Result<Record>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let poll = this.inner.poll_next(cx);
        if let Poll::Ready(Some(Ok(_))) = &poll {
            *this.received += 1;
        }
        poll
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Everything a drained stream produced
#[derive(Debug)]
pub struct SearchOutcome {
    /// Records in server order
    pub records: Vec<Record>,
    /// Error that ended the session early, if any
    pub error: Option<Error>,
    /// Producer summary, if the producer task could be joined
    pub summary: Option<SessionSummary>,
}

impl SearchOutcome {
    /// Check if the session ended without an error
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Check if records were delivered before a failure
    pub fn is_degraded(&self) -> bool {
        self.error.is_some() && !self.records.is_empty()
    }

    /// Records, or the error if one occurred
    pub fn into_result(self) -> Result<Vec<Record>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.records),
        }
    }
}
