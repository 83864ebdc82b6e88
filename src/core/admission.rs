//! # Admission decision.
//!
//! Runs on every submission, after the submission was counted:
//!
//! ```text
//! in_flight = submitted - completed     (includes the item being submitted)
//! in_flight <= limit  → Run
//! in_flight >  limit  → Enqueue
//! ```
//!
//! ## Invariants
//! - The boundary is inclusive: the item being submitted counts toward `limit`.
//! - `in_flight` includes queued items, so while the queue is non-empty every new
//!   submission is enqueued behind it (global FIFO for deferred items).

/// Outcome of the admission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Hand the item to the execution engine now.
    Run,
    /// Append the item to the pending queue.
    Enqueue,
}

/// Decides what to do with an item that was just counted as submitted.
pub(crate) fn decide(in_flight: u64, limit: usize) -> Admission {
    if in_flight <= limit as u64 {
        Admission::Run
    } else {
        Admission::Enqueue
    }
}
