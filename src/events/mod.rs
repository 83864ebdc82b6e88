//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** the runner uses
//! to publish admission, execution and drain events.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Runner::submit` (queued), the execution engine
//!   (starting/failed/completed/drained).
//! - **Consumers**: the runner's subscriber listener, which fans out to a
//!   [`SubscriberSet`](crate::SubscriberSet), and any receiver obtained from
//!   [`Runner::events`](crate::Runner::events).
//!
//! The bus is observability only. Queue draining never depends on it.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
