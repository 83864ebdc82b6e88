//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`] that
//! fans runner events out to every subscriber.
//!
//! ## Architecture
//! ```text
//! engine / submit ── publish(Event) ──► Bus ──► subscriber listener
//!                                                      │
//!                                                      ▼
//!                                              SubscriberSet::emit
//!                                          ┌───────────┼───────────┐
//!                                          ▼           ▼           ▼
//!                                     [queue S1]  [queue S2]  [queue SN]
//!                                          ▼           ▼           ▼
//!                                      on_event()  on_event()  on_event()
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use async_trait::async_trait;
//! use flowgate::{Event, EventKind, Subscribe};
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscribe for FailureCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::ItemFailed {
//!             // increment failure counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "failure-counter"
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
