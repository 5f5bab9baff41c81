//! Pagination types
//!
//! Configuration defaults, the per-session state machine, and the summary a
//! finished session reports.

/// Records per request; the search endpoint refuses anything larger
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Records delivered when the caller gives no maximum and the query no limit
pub const DEFAULT_MAX_RESULTS: usize = 400;

/// Records buffered between the producer task and the consumer
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

// ============================================================================
// Configuration
// ============================================================================

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Records requested per page (the server's ceiling)
    pub page_size: u32,
    /// Maximum used when neither the caller nor the query sets one
    pub default_max_results: usize,
    /// Capacity of the handoff channel
    pub channel_capacity: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_max_results: DEFAULT_MAX_RESULTS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl PaginationConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the default maximum
    #[must_use]
    pub fn with_default_max_results(mut self, max: usize) -> Self {
        self.default_max_results = max;
        self
    }

    /// Set channel capacity
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Reconcile the caller's maximum with the query's limit override
    ///
    /// The override wins whenever it is present. A missing or zero caller
    /// maximum falls back to `default_max_results`.
    pub fn resolve_max(&self, caller_max: Option<usize>, limit_override: Option<usize>) -> usize {
        if let Some(limit) = limit_override {
            return limit;
        }
        caller_max
            .filter(|max| *max > 0)
            .unwrap_or(self.default_max_results)
    }
}

// ============================================================================
// Session State
// ============================================================================

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Created, nothing fetched yet
    #[default]
    Idle,
    /// Waiting on a page fetch
    Fetching,
    /// Handing records of the current page to the consumer
    Emitting,
    /// Finished normally
    Exhausted,
    /// Stopped because the consumer went away
    Cancelled,
    /// Stopped on a page fetch error
    Failed,
}

impl Phase {
    /// Check if the session has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Cancelled | Self::Failed)
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The effective maximum was delivered
    MaxReached,
    /// A page came back with no records
    EmptyPage,
    /// A page came back smaller than the page size
    ShortPage,
    /// The last record's cursor equalled the cursor that fetched it
    CursorStalled,
    /// The consumer dropped or closed the stream
    ConsumerGone,
    /// A page fetch failed; the error was delivered as the last item
    FetchFailed,
}

impl StopReason {
    /// Terminal phase for this reason
    pub fn phase(&self) -> Phase {
        match self {
            Self::ConsumerGone => Phase::Cancelled,
            Self::FetchFailed => Phase::Failed,
            _ => Phase::Exhausted,
        }
    }
}

/// State owned by the producer for one streaming call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    effective_max: usize,
    emitted: usize,
    cursor: Option<String>,
    pages_fetched: usize,
    phase: Phase,
}

impl SessionState {
    /// Create a session that will deliver at most `effective_max` records
    pub fn new(effective_max: usize, cursor: Option<String>) -> Self {
        Self {
            effective_max,
            emitted: 0,
            cursor,
            pages_fetched: 0,
            phase: Phase::Idle,
        }
    }

    pub fn effective_max(&self) -> usize {
        self.effective_max
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Records still owed to the consumer
    pub fn remaining(&self) -> usize {
        self.effective_max.saturating_sub(self.emitted)
    }

    /// Check if the effective maximum has been delivered
    pub fn is_satisfied(&self) -> bool {
        self.emitted >= self.effective_max
    }

    /// Mark a page request as in flight
    pub fn begin_fetch(&mut self) {
        self.phase = Phase::Fetching;
    }

    /// Account for a fetched page
    ///
    /// Only the first page's total clamps the effective maximum; totals on
    /// later pages are ignored. Returns true when the maximum was lowered.
    pub fn observe_total(&mut self, total: u64) -> bool {
        let first_page = self.pages_fetched == 0;
        self.pages_fetched += 1;
        self.phase = Phase::Emitting;

        let total = usize::try_from(total).unwrap_or(usize::MAX);
        if first_page && total < self.effective_max {
            self.effective_max = total;
            return true;
        }
        false
    }

    /// Count one delivered record
    pub fn record_emitted(&mut self) {
        debug_assert!(self.emitted < self.effective_max, "over-delivery");
        self.emitted += 1;
    }

    /// Move the cursor; false when it would not change
    pub fn advance_cursor(&mut self, cursor: &str) -> bool {
        if self.cursor.as_deref().unwrap_or_default() == cursor {
            return false;
        }
        self.cursor = Some(cursor.to_string());
        true
    }

    /// End the session
    pub fn finish(&mut self, reason: StopReason) -> SessionSummary {
        self.phase = reason.phase();
        SessionSummary {
            stop_reason: reason,
            emitted: self.emitted,
            pages_fetched: self.pages_fetched,
            effective_max: self.effective_max,
            last_cursor: self.cursor.clone(),
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Outcome of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Why the session stopped
    pub stop_reason: StopReason,
    /// Records handed to the consumer
    pub emitted: usize,
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Effective maximum after clamping to the first page's total
    pub effective_max: usize,
    /// Cursor of the last page request
    pub last_cursor: Option<String>,
}

impl SessionSummary {
    /// Check if the session delivered everything it set out to
    pub fn is_complete(&self) -> bool {
        !matches!(
            self.stop_reason,
            StopReason::FetchFailed | StopReason::ConsumerGone
        )
    }
}
