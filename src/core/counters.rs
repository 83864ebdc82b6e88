//! # Submission and completion counters.
//!
//! Two monotonically increasing counts, `submitted` and `completed`, from which
//! every other quantity is derived:
//!
//! ```text
//! in_flight = submitted - completed      (running + queued)
//! drained   = submitted == completed
//! ```
//!
//! ## Rules
//! - `completed <= submitted` at all times
//! - neither count ever decreases; there is no reset

use std::fmt;

/// Identity of a submitted item: its 1-based submission ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Creates a ticket from a submission ordinal.
    pub const fn new(ordinal: u64) -> Self {
        Self(ordinal)
    }

    /// Returns the submission ordinal.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Point-in-time view of a runner's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Items submitted so far.
    pub submitted: u64,
    /// Items that reached a terminal state.
    pub completed: u64,
    /// `submitted - completed`, queued items included.
    pub in_flight: u64,
    /// Items inside the execution engine.
    pub running: u64,
    /// Items waiting in the queue.
    pub queued: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    submitted: u64,
    completed: u64,
}

impl Counters {
    /// Counts a new submission and returns its ticket.
    pub fn record_submitted(&mut self) -> Ticket {
        self.submitted += 1;
        Ticket(self.submitted)
    }

    /// Counts one finished execution.
    pub fn record_completed(&mut self) {
        debug_assert!(self.completed < self.submitted, "completion without submission");
        self.completed += 1;
    }

    /// Submitted but not yet completed; includes queued items.
    pub fn in_flight(&self) -> u64 {
        self.submitted - self.completed
    }

    pub fn is_in_progress(&self) -> bool {
        self.completed < self.submitted
    }

    pub fn stats(&self, queued: usize) -> Stats {
        let queued = queued as u64;
        let in_flight = self.in_flight();
        Stats {
            submitted: self.submitted,
            completed: self.completed,
            in_flight,
            running: in_flight.saturating_sub(queued),
            queued,
        }
    }
}
