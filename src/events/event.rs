//! # Events emitted by a runner.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata
//! (ticket, progress counters, failure reason, drain duration).
//!
//! ## Ordering guarantees
//! Each event has a process-wide sequence number (`seq`) that increases
//! monotonically. Use it to restore order across receivers.
//!
//! ## Example
//! ```rust
//! use flowgate::{Event, EventKind, Ticket};
//!
//! let ev = Event::new(EventKind::ItemCompleted)
//!     .with_ticket(Ticket::new(3))
//!     .with_progress(3, 10);
//!
//! assert_eq!(ev.kind, EventKind::ItemCompleted);
//! assert_eq!(ev.completed, Some(3));
//! assert_eq!(ev.submitted, Some(10));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::core::Ticket;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runner events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Item could not be admitted and was appended to the queue.
    ///
    /// Sets:
    /// - `ticket`: the queued item
    /// - `submitted` / `completed`: counters after the submission
    ItemQueued,

    /// Execution callback is about to run for an item.
    ///
    /// Sets:
    /// - `ticket`: the item
    ItemStarting,

    /// Execution callback failed (error or panic).
    ///
    /// Sets:
    /// - `ticket`: the item
    /// - `reason`: failure message
    ItemFailed,

    /// Item reached its terminal state and was counted as completed.
    ///
    /// Sets:
    /// - `ticket`: the item
    /// - `submitted` / `completed`: counters after the completion
    ItemCompleted,

    /// Every submitted item has completed.
    ///
    /// Sets:
    /// - `submitted` / `completed`: equal counters
    /// - `elapsed_ms`: time since the first submission
    Drained,
}

/// Runner event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Process-wide, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Item the event refers to, if any.
    pub ticket: Option<Ticket>,
    /// `submitted` counter at publish time.
    pub submitted: Option<u64>,
    /// `completed` counter at publish time.
    pub completed: Option<u64>,
    /// Human-readable failure reason.
    pub reason: Option<Arc<str>>,
    /// Time since the first submission in milliseconds.
    pub elapsed_ms: Option<u64>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            ticket: None,
            submitted: None,
            completed: None,
            reason: None,
            elapsed_ms: None,
        }
    }

    /// Attaches the item ticket.
    #[inline]
    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.ticket = Some(ticket);
        self
    }

    /// Attaches progress counters.
    #[inline]
    pub fn with_progress(mut self, completed: u64, submitted: u64) -> Self {
        self.completed = Some(completed);
        self.submitted = Some(submitted);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the elapsed time (stored as milliseconds, saturating).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        self.elapsed_ms = Some(u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        self
    }
}
