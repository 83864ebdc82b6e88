//! # Pending queue.
//!
//! FIFO buffer of items that were submitted while the runner was saturated.
//! Insertion order is submission order; the engine dequeues from the head only.

use std::collections::VecDeque;

use super::counters::Ticket;

#[derive(Debug)]
pub(crate) struct PendingQueue<T> {
    items: VecDeque<(Ticket, T)>,
}

impl<T> PendingQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Appends an item at the tail.
    pub fn push(&mut self, ticket: Ticket, item: T) {
        debug_assert!(
            self.items.back().is_none_or(|(last, _)| *last < ticket),
            "queue must stay in submission order"
        );
        self.items.push_back((ticket, item));
    }

    /// Removes the oldest item.
    pub fn pop(&mut self) -> Option<(Ticket, T)> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
